use std::path::PathBuf;

use clap::Args;
use console::style;
use methevents::io::write_csv;
use methevents::prelude::*;

use crate::run::read_options;

#[derive(Args, Debug, Clone)]
pub(crate) struct CodesArgs {
    #[arg(help = "Path of the input table (.csv, .tsv, .txt or .xlsx).")]
    input:     PathBuf,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path of the generated CSV file."
    )]
    output:    PathBuf,
    #[arg(
        long,
        required = false,
        help_heading = "INPUT ARGS",
        help = "Field separator. Defaults to tab for .tsv files and comma otherwise."
    )]
    separator: Option<char>,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "INPUT ARGS",
        help = "The input has no header line."
    )]
    no_header: bool,
}

impl CodesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        if self.output.is_dir() {
            anyhow::bail!("Output path {} is a directory", self.output.display());
        }
        let table = read_input(&self.input, &read_options(self.separator, self.no_header)?)?;
        let coded = CodedTable::generate(&table)?;
        let mut augmented = coded.augment(&table)?;
        write_csv(&mut augmented, &self.output)?;

        println!(
            "[{}] {} rows x {} replicates written to {}",
            style("V").green(),
            coded.n_rows(),
            coded.n_replicates(),
            style(self.output.display()).green()
        );
        Ok(())
    }
}
