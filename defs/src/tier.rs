use std::fmt;

/// Environment name that selects the production tier.
pub const PRODUCTION_ENVIRONMENT: &str = "prod";

/// Deployment tier derived from the environment name.
///
/// Standard tiers get a named gateway stage and a `{image}/{environment}`
/// mapping key; production maps the bare `{image}` key onto the default stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    Standard(String),
    Production,
}

impl Tier {
    pub fn from_environment(environment: &str) -> Self {
        if environment == PRODUCTION_ENVIRONMENT {
            Tier::Production
        } else {
            Tier::Standard(environment.to_string())
        }
    }

    pub fn environment(&self) -> &str {
        match self {
            Tier::Standard(name) => name,
            Tier::Production => PRODUCTION_ENVIRONMENT,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Tier::Production)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.environment())
    }
}
