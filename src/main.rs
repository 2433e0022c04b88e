use std::sync::Arc;

use payments_analytics::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = Arc::new(
		payments_analytics::config::Config::load()
			.map_err(std::io::Error::other)?,
	);
	run(config).await
}
