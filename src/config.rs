use serde::Deserialize;

pub const DEFAULT_FEE_RULES_KEY: &str = "integration_settings:fee_rules";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url:         String,
	#[serde(default = "default_server_host")]
	pub server_host:       String,
	#[serde(default = "default_server_port")]
	pub server_port:       u16,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive:  u64,
	#[serde(default = "default_fee_rules_key")]
	pub fee_rules_key:     String,
	/// Upper bound for JSON request bodies; analytics windows can carry
	/// thousands of payments.
	#[serde(default = "default_max_payload_bytes")]
	pub max_payload_bytes: usize,
}

fn default_server_host() -> String {
	"0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
	9999
}

fn default_server_keepalive() -> u64 {
	75
}

fn default_fee_rules_key() -> String {
	DEFAULT_FEE_RULES_KEY.to_string()
}

fn default_max_payload_bytes() -> usize {
	8 * 1024 * 1024
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}
}
