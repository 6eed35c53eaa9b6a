use lambda_http::Error;
use std::str::FromStr;

const DEFAULT_TABLE: &str = "MyTable";

/// How incoming requests are matched to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Routing {
    /// POST/GET/PUT/DELETE select create/read/update/delete.
    #[default]
    Method,
    /// `/create`, `/read`, `/update` and `/delete` select the operation.
    Path,
}

impl FromStr for Routing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "method" => Ok(Routing::Method),
            "path" => Ok(Routing::Path),
            other => Err(Error::from(format!(
                "ROUTING_MODE must be 'method' or 'path', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) table_name: String,
    pub(crate) routing: Routing,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup("TABLE_NAME")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let routing = match lookup("ROUTING_MODE") {
            Some(mode) => mode.parse()?,
            None => Routing::default(),
        };

        Ok(Config {
            table_name,
            routing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_my_table_and_method_routing() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.table_name, "MyTable");
        assert_eq!(config.routing, Routing::Method);
    }

    #[test]
    fn reads_table_and_routing() {
        let config =
            Config::from_lookup(lookup(&[("TABLE_NAME", "items-prod"), ("ROUTING_MODE", "PATH")]))
                .unwrap();
        assert_eq!(config.table_name, "items-prod");
        assert_eq!(config.routing, Routing::Path);
    }

    #[test]
    fn rejects_unknown_routing() {
        let err = Config::from_lookup(lookup(&[("ROUTING_MODE", "verb")])).unwrap_err();
        assert!(err.to_string().contains("ROUTING_MODE"));
    }
}
