//! Plain text output for the inspection commands.

use overseer_chaintsn::BlockApplyOutput;
use overseer_primitives::ChainEntry;

/// Trait for objects that can be formatted for porcelain output
pub(crate) trait Formattable {
    /// Format for machine-readable output (parseable, stable, human-readable)
    fn format_porcelain(&self) -> String;
}

impl Formattable for ChainEntry {
    fn format_porcelain(&self) -> String {
        format!("position: {}\ntxid: {}", self.position(), self.txid())
    }
}

impl Formattable for BlockApplyOutput {
    fn format_porcelain(&self) -> String {
        let mut out = format!(
            "height: {}\naccepted: {}\nconflicts: {}\nrejections: {}",
            self.height,
            self.report.accepted().len(),
            self.report.conflicts(),
            self.report.rejections(),
        );
        for entry in self.report.accepted() {
            out.push_str(&format!("\nentry: {entry}"));
        }
        out
    }
}

/// Processed height, absent before the first block.
#[derive(Debug)]
pub(crate) struct HeightInfo(pub Option<u64>);

impl Formattable for HeightInfo {
    fn format_porcelain(&self) -> String {
        match self.0 {
            Some(height) => format!("height: {height}"),
            None => "height: none".to_string(),
        }
    }
}

/// Entries of a position range, one per line.
#[derive(Debug)]
pub(crate) struct EntryList(pub Vec<ChainEntry>);

impl Formattable for EntryList {
    fn format_porcelain(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{} {}", e.position(), e.txid()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Prints the porcelain form of `item` to stdout.
pub(crate) fn output(item: &impl Formattable) {
    println!("{}", item.format_porcelain());
}
