use log::LevelFilter;
use env_logger::Builder;
use std::io::Write;
use chrono::Local;

/// `RUST_LOG`, when set, overrides `level`.
pub fn init(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .init();

    log::debug!("Logger initialized.");
}
