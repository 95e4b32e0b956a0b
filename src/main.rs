//! Stampcart command-line shell.

use std::io;

use stampcart::cli::{self, AppError, Config, logging};

fn main() -> Result<(), AppError> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    logging::init(&config.logging)?;

    cli::run(config, io::stdout().lock())
}
