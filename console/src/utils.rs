use clap::Args;
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        default_value_t = 0,
        help_heading = "UTILS",
        help = "Number of threads to use. 0 uses all available cores."
    )]
    pub threads: usize,
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help_heading = "UTILS",
        help = "Increase logging verbosity. Repeat for more output (-vv). \
                RUST_LOG overrides this flag."
    )]
    pub verbose: u8,
}

impl UtilsArgs {
    /// Installs the logger and sizes the global rayon pool.
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)?;
        init_rayon_threads(self.threads)?;
        Ok(())
    }
}

fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()?;
    Ok(())
}

fn init_rayon_threads(threads: usize) -> anyhow::Result<()> {
    if threads > 0 {
        // The library sizes its own pool from this variable on first use.
        std::env::set_var("METHEVENTS_NUM_THREADS", threads.to_string());
        std::env::set_var("POLARS_MAX_THREADS", threads.to_string());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    Ok(())
}
