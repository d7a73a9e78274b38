use anyhow::{format_err, Result};
use chrono::FixedOffset;
use std::{fmt, net::SocketAddr, path::PathBuf, time::Duration};

#[derive(clap::Parser, Debug, Clone)]
#[clap(about = "Serve a live, filterable view of a vehicle auction catalog")]
pub struct Config {
    /// JSON array of vehicle records
    #[clap(long, env, default_value = "data/vehicles.json")]
    pub dataset: PathBuf,

    #[clap(long, env, default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    /// Seconds between countdown refreshes
    #[clap(long, env, default_value_t = 5)]
    pub tick_secs: u64,

    /// Offset applied to auction timestamps that carry none
    #[clap(long, env, default_value_t = 0, allow_negative_numbers = true)]
    pub utc_offset_minutes: i32,

    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    #[clap(long, env, default_value = "info,auction_lister=debug")]
    pub log_filter: String,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs.max(1))
    }

    pub fn auction_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or_else(|| format_err!("utc offset out of range: {}min", self.utc_offset_minutes))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            dataset,
            bind_address,
            tick_secs,
            utc_offset_minutes,
            log_filter,
        } = self;

        writeln!(f, "dataset: {}", dataset.display())?;
        writeln!(f, "bind_address: {bind_address}")?;
        writeln!(f, "tick_secs: {tick_secs}")?;
        writeln!(f, "utc_offset_minutes: {utc_offset_minutes}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        Ok(())
    }
}
