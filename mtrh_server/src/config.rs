
use crate::{Error, Result};
use std::{env, net::SocketAddr, str::FromStr, sync::OnceLock};

pub fn config() -> &'static Config {
    static INSTANCE: OnceLock<Config> = OnceLock::new();

    INSTANCE.get_or_init(|| {
        Config::load_from_env().unwrap_or_else(|e| {
            panic!("FATAL - UNABLE TO LOAD CONFIG - Cause: {e:?}")
        })
    })
}

#[allow(non_snake_case)]
pub struct Config {
    pub WEB_FOLDER: String,
    pub DB_URL: String,
    pub LISTEN_ADDR: SocketAddr,
}

impl Config {
    fn load_from_env() -> Result<Config> {
        Ok(Config {
            WEB_FOLDER: get_env("SERVICE_WEB_FOLDER")?,
            DB_URL: get_env("SERVICE_DB_URL")?,
            LISTEN_ADDR: get_env_parse("SERVICE_LISTEN_ADDR")?,
        })
    }
}

fn get_env(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| Error::ConfigMissingEnv(name))
}

fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T> {
    let val = get_env(name)?;
    val.parse::<T>().map_err(|_| Error::ConfigWrongFormat(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        let res = get_env("MTRH_TEST_SURELY_UNSET_VAR");

        assert!(matches!(res, Err(Error::ConfigMissingEnv("MTRH_TEST_SURELY_UNSET_VAR"))));
    }

    #[test]
    fn test_get_env_parse_wrong_format() {
        // PATH is always set and never a socket address.
        let res = get_env_parse::<SocketAddr>("PATH");

        assert!(matches!(res, Err(Error::ConfigWrongFormat("PATH"))));
    }
}
