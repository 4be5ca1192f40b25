#![allow(dead_code)]

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use methevents::prelude::*;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};

/// One input row: context, `Da`, `A_R1..`, `Dk`, `K_R1..`.
#[derive(Debug, Clone)]
pub struct DemoRow {
    pub context: String,
    pub da:      String,
    pub a:       Vec<String>,
    pub dk:      String,
    pub k:       Vec<String>,
}

impl DemoRow {
    /// Builds a row whose replicate `r` generates `codes[r]`. `Da` and `Dk`
    /// are taken from the first code.
    pub fn from_codes(
        context: &str,
        codes: &[&str],
    ) -> Self {
        let first = codes[0].as_bytes();
        let symbol = |b: u8| (b as char).to_string();
        let (da, dk) = (symbol(first[0]), symbol(first[2]));
        for code in codes {
            let bytes = code.as_bytes();
            assert_eq!(symbol(bytes[0]), da, "Da must agree across replicates");
            assert_eq!(symbol(bytes[2]), dk, "Dk must agree across replicates");
        }
        Self {
            context: context.to_string(),
            da,
            a: codes.iter().map(|c| symbol(c.as_bytes()[1])).collect(),
            dk,
            k: codes.iter().map(|c| symbol(c.as_bytes()[3])).collect(),
        }
    }
}

/// Builds input frames and files with arbitrary headers.
pub struct DemoInputBuilder {
    n_replicates: usize,
    rows:         Vec<DemoRow>,
}

impl DemoInputBuilder {
    pub fn new(n_replicates: usize) -> Self {
        Self {
            n_replicates,
            rows: Vec::new(),
        }
    }

    pub fn row(
        mut self,
        context: &str,
        codes: &[&str],
    ) -> Self {
        assert_eq!(codes.len(), self.n_replicates);
        self.rows.push(DemoRow::from_codes(context, codes));
        self
    }

    pub fn push(
        mut self,
        row: DemoRow,
    ) -> Self {
        self.rows.push(row);
        self
    }

    /// Random rows over the binary alphabet with a fixed seed. One row in
    /// `unknown_every` carries an unrecognised context when nonzero.
    pub fn random(
        n_replicates: usize,
        n_rows: usize,
        seed: u64,
        unknown_every: usize,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let contexts = ["CG", "CXG", "CXX"];
        let rows = (0..n_rows)
            .map(|i| {
                let context = if unknown_every > 0 && i % unknown_every == 0 {
                    "CHH".to_string()
                }
                else {
                    contexts[rng.gen_range(0..contexts.len())].to_string()
                };
                DemoRow {
                    context,
                    da: bit(&mut rng),
                    a: (0..n_replicates).map(|_| bit(&mut rng)).collect(),
                    dk: bit(&mut rng),
                    k: (0..n_replicates).map(|_| bit(&mut rng)).collect(),
                }
            })
            .collect();
        Self { n_replicates, rows }
    }

    pub fn rows(&self) -> &[DemoRow] {
        &self.rows
    }

    /// Header names deliberately differ from the canonical ones.
    fn header(&self) -> Vec<String> {
        let mut names = vec!["context".to_string(), "ref_a".to_string()];
        names.extend((1..=self.n_replicates).map(|r| format!("sample_a{}", r)));
        names.push("ref_k".to_string());
        names.extend((1..=self.n_replicates).map(|r| format!("sample_k{}", r)));
        names
    }

    pub fn build_frame(&self) -> DataFrame {
        let header = self.header();
        let mut columns = Vec::with_capacity(header.len());
        let mut push = |idx: usize, values: Vec<String>| {
            columns.push(Column::from(Series::new(header[idx].as_str().into(), values)));
        };
        push(0, self.rows.iter().map(|r| r.context.clone()).collect());
        push(1, self.rows.iter().map(|r| r.da.clone()).collect());
        for rep in 0..self.n_replicates {
            push(2 + rep, self.rows.iter().map(|r| r.a[rep].clone()).collect());
        }
        push(2 + self.n_replicates, self.rows.iter().map(|r| r.dk.clone()).collect());
        for rep in 0..self.n_replicates {
            push(
                3 + self.n_replicates + rep,
                self.rows.iter().map(|r| r.k[rep].clone()).collect(),
            );
        }
        DataFrame::new(columns).unwrap()
    }

    pub fn build_table(&self) -> InputTable {
        InputTable::try_new(self.build_frame()).unwrap()
    }

    /// Writes the rows as delimited text into `dir/name`.
    pub fn write_file(
        &self,
        dir: &Path,
        name: &str,
        separator: char,
    ) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", self.header().join(&separator.to_string())).unwrap();
        for row in self.rows.iter() {
            let mut fields = vec![row.context.clone(), row.da.clone()];
            fields.extend(row.a.iter().cloned());
            fields.push(row.dk.clone());
            fields.extend(row.k.iter().cloned());
            writeln!(file, "{}", fields.join(&separator.to_string())).unwrap();
        }
        path
    }

    /// Writes the rows into the first worksheet of `dir/name`. Symbols that
    /// parse as numbers are stored as numeric cells, the way spreadsheets
    /// usually hold them.
    pub fn write_xlsx(
        &self,
        dir: &Path,
        name: &str,
    ) -> PathBuf {
        let path = dir.join(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in self.header().iter().enumerate() {
            sheet.write_string(0, col as u16, name).unwrap();
        }
        for (idx, row) in self.rows.iter().enumerate() {
            let mut fields = vec![row.context.clone(), row.da.clone()];
            fields.extend(row.a.iter().cloned());
            fields.push(row.dk.clone());
            fields.extend(row.k.iter().cloned());
            for (col, field) in fields.iter().enumerate() {
                let (r, c) = (idx as u32 + 1, col as u16);
                match field.parse::<f64>() {
                    Ok(number) => sheet.write_number(r, c, number).unwrap(),
                    Err(_) => sheet.write_string(r, c, field).unwrap(),
                };
            }
        }
        workbook.save(&path).unwrap();
        path
    }
}

fn bit(rng: &mut StdRng) -> String {
    if rng.gen_bool(0.5) {
        "1".to_string()
    }
    else {
        "0".to_string()
    }
}

/// Four rows, one replicate: CG `0000` twice, CXG `0110`, CXX `1001`.
pub fn worked_example() -> DemoInputBuilder {
    DemoInputBuilder::new(1)
        .row("CG", &["0000"])
        .row("CG", &["0000"])
        .row("CXG", &["0110"])
        .row("CXX", &["1001"])
}

/// Compares floats treating NaN as equal to NaN.
pub fn same_float(
    a: f64,
    b: f64,
) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
