
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let hc = httpc_test::new_client("http://localhost:3000")?;

    let req_create = hc.do_post(
        "/api/patients",
        json!({
            "diagnosis": "Malaria",
            "healthcare_unit": "MOPC CLINIC - MTRH",
            "patient_id": "P-1001",
            "mobile_number": "0712345678",
            "gender": "Female",
            "age": 34
        }),
    );
    req_create.await?.print().await?;

    hc.do_get("/api/patients/P-1001").await?.print().await?;
    hc.do_get("/api/patients").await?.print().await?;
    hc.do_delete("/api/patients/P-1001").await?.print().await?;
    hc.do_get("/api/patients/P-1001").await?.print().await?;

    Ok(())
}
