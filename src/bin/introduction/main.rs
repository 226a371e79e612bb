use std::path::Path;

use introbook::intro;
use introbook::prelude::*;

/// Writes `Sample.csv` into the working directory and opens the notebook.
#[notebook(name = "Introduction")]
fn introduction(nb: &mut NotebookCtx) {
    intro::introduction(nb, Path::new("."));
}

fn main() {
    introduction();
}
