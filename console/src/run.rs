use std::fs::File;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;
use console::style;
use dialoguer::Input;
use methevents::prelude::*;


#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    #[arg(help = "Path of the input table (.csv, .tsv, .txt or .xlsx). Prompted for when omitted.")]
    input:      Option<PathBuf>,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Directory for the generated tables."
    )]
    output:     PathBuf,
    #[arg(
        short = 'c',
        long,
        required = false,
        help = "JSON file with aggregation settings."
    )]
    config:     Option<PathBuf>,
    #[arg(
        long,
        default_value_t = false,
        help = "Process scopes one after another on a single thread."
    )]
    sequential: bool,
    #[arg(
        long,
        required = false,
        help_heading = "INPUT ARGS",
        help = "Field separator. Defaults to tab for .tsv files and comma otherwise."
    )]
    separator:  Option<char>,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "INPUT ARGS",
        help = "The input has no header line."
    )]
    no_header:  bool,
}

impl RunArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let input = match &self.input {
            Some(path) => path.clone(),
            None => prompt_input_path()?,
        };

        let mut config = match &self.config {
            Some(path) => AggregationConfig::from_json(File::open(path)?)?,
            None => AggregationConfig::default(),
        };
        if self.sequential {
            config = config.with_parallel(false);
        }

        let read_options = read_options(self.separator, self.no_header)?;
        let table = read_input(&input, &read_options)?;
        let result = config.run(&table)?;
        let written = write_results(&result, &self.output)?;

        if result.quality.unknown_context_rows > 0 {
            eprintln!(
                "{} rows have an unrecognised context and only count towards {}",
                style(result.quality.unknown_context_rows).yellow(),
                style("total_df.csv").yellow()
            );
        }
        if result.quality.has_unclassified() {
            eprintln!(
                "{} generated codes are not event codes, see {}",
                style(result.quality.unclassified_total(Scope::All)).yellow(),
                style("unclassified.csv").yellow()
            );
        }
        for path in written {
            println!("[{}] {}", style("V").green(), path.display());
        }
        Ok(())
    }
}

pub(crate) fn read_options(
    separator: Option<char>,
    no_header: bool,
) -> anyhow::Result<ReadOptions> {
    let separator = separator
        .map(|c| {
            u8::try_from(c).map_err(|_| anyhow!("separator {:?} is not a single-byte character", c))
        })
        .transpose()?;
    Ok(ReadOptions::default()
        .with_separator(separator)
        .with_has_header(!no_header))
}

fn prompt_input_path() -> anyhow::Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt("Path to the input table (.csv, .tsv, .txt or .xlsx)")
        .interact_text()?;
    Ok(PathBuf::from(raw.trim()))
}
