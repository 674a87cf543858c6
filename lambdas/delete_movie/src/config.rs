use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub table_name: String,
    pub region: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::raw().only(&["TABLE_NAME", "REGION"]))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn when_table_name_is_set_should_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLE_NAME", "movies");

            let config = Config::load().unwrap();

            assert_eq!(config.table_name, "movies");
            assert_eq!(config.region, None);

            Ok(())
        });
    }

    #[test]
    fn when_region_is_set_should_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLE_NAME", "movies");
            jail.set_env("REGION", "eu-west-1");

            let config = Config::load().unwrap();

            assert_eq!(config.region.as_deref(), Some("eu-west-1"));

            Ok(())
        });
    }
}
