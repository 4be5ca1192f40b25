use clap::Args;
use console::style;
use itertools::Itertools;
use methevents::prelude::*;

#[derive(Args, Debug, Clone)]
pub(crate) struct TaxonomyArgs {
    #[arg(
        long,
        default_value_t = false,
        help = "Print the taxonomy as JSON (code -> categories)."
    )]
    json: bool,
}

impl TaxonomyArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        if self.json {
            let map = EventCode::iter()
                .map(|code| {
                    let categories = code
                        .categories()
                        .iter()
                        .map(|c| c.as_str())
                        .collect_vec();
                    (code.as_str(), categories)
                })
                .collect::<std::collections::BTreeMap<_, _>>();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        for code in EventCode::iter() {
            let categories = code.categories();
            let label = if categories.is_empty() {
                style("-".to_string()).dim()
            }
            else {
                style(categories.iter().join(", ")).cyan()
            };
            println!("{}\t{}", style(code).bold(), label);
        }
        Ok(())
    }
}
