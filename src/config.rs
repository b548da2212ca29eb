use crate::errors::{PolicyError, SetupError};
use crate::policies::{BatchPolicy, BatchPolicyType, Policy, PolicyName, PolicyType};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{de::Error as _, Deserialize, Deserializer};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Single(#[serde(deserialize_with = "policy_type_or_name")] PolicyType),
    Batched(BatchPolicyType),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyTypeOrName {
    Name(PolicyName),
    Params(PolicyType),
}

// a bare policy name selects the default parameters
fn policy_type_or_name<'de, D>(deserializer: D) -> Result<PolicyType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PolicyTypeOrName::deserialize(deserializer)? {
        PolicyTypeOrName::Name(name) => PolicyType::from(name),
        PolicyTypeOrName::Params(policy_type) => policy_type,
    })
}

// enum shapes are resolved on a buffered JSON value, not by the config deserializer
fn deserialize_policy<'de, D>(deserializer: D) -> Result<PolicyKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    serde_json::from_value(value).map_err(D::Error::custom)
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExperimentConfig {
    pub num_arms: usize,
    pub horizon: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(deserialize_with = "deserialize_policy")]
    pub policy: PolicyKind,
}

pub enum PolicyHandle {
    Single(Box<dyn Policy + Send>),
    Batched(Box<dyn BatchPolicy + Send>),
}

impl ExperimentConfig {
    // optional `bandit.{toml,json,yaml}` file, overridden by BANDIT_* variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("bandit").required(false))
            .add_source(
                Environment::with_prefix("BANDIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }

    pub fn parse(contents: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from_str(contents, format))
            .build()?;

        builder.try_deserialize()
    }

    pub fn build(self) -> Result<PolicyHandle, PolicyError> {
        let (num_arms, horizon, seed) = (self.num_arms, self.horizon, self.seed);
        let handle = match self.policy {
            PolicyKind::Single(policy_type) => {
                PolicyHandle::Single(policy_type.into_inner(num_arms, horizon, seed)?)
            }
            PolicyKind::Batched(policy_type) => {
                PolicyHandle::Batched(policy_type.into_inner(num_arms, horizon, seed)?)
            }
        };

        Ok(handle)
    }
}

pub fn policy_from_env() -> Result<PolicyHandle, SetupError> {
    Ok(ExperimentConfig::from_env()?.build()?)
}
