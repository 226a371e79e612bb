use eframe::egui;
use introbook::csv::read_csv;
use introbook::intro::{self, Language};
use introbook::sample::{sample_frame, write_sample, SAMPLE_COLUMNS, SAMPLE_ROWS};
use introbook::upload::CsvUpload;
use introbook::{themes, NotebookCtx};

fn run_frames(notebook: &mut introbook::Notebook, frames: usize) {
    let ctx = egui::Context::default();
    themes::install(&ctx);
    for _ in 0..frames {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(900.0, 1200.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| notebook.show(ctx));
    }
}

#[test]
fn sample_csv_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let sample = write_sample(dir.path()).unwrap();
    assert_eq!(sample.path.file_name().unwrap(), "Sample.csv");

    let back = read_csv(&sample.path).unwrap();
    assert_eq!(back.shape(), (SAMPLE_ROWS, SAMPLE_COLUMNS.len()));
    assert!(back.equals(&sample_frame().unwrap()));
}

#[test]
fn sample_file_is_replaced_on_every_start() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Sample.csv"), "stale\n").unwrap();
    let sample = write_sample(dir.path()).unwrap();
    let back = read_csv(&sample.path).unwrap();
    assert_eq!(back.height(), SAMPLE_ROWS);
}

#[test]
fn uploaded_table_matches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let sample = write_sample(dir.path()).unwrap();

    let mut upload = CsvUpload::new();
    assert!(upload.table().is_none());
    upload.select(&sample.path).unwrap();
    upload.wait();
    assert!(upload.table().unwrap().equals(&sample.frame));
}

#[test]
fn introduction_notebook_draws() {
    let dir = tempfile::tempdir().unwrap();
    let mut nb = NotebookCtx::new();
    intro::introduction(&mut nb, dir.path());

    let mut notebook = nb.into_notebook("Introduction");
    run_frames(&mut notebook, 2);

    let store = notebook.store();
    assert_eq!(store.len(), 5);
    assert!(dir.path().join("Sample.csv").is_file());

    let language = store.get_or_insert(egui::Id::new("language"), Language::C);
    assert_eq!(*language.read_in(store), Language::Python);
    let age = store.get_or_insert(egui::Id::new("age"), 50_u32);
    assert_eq!(*age.read_in(store), 0);
}

#[test]
fn drawing_keeps_a_language_set_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut nb = NotebookCtx::new();
    intro::introduction(&mut nb, dir.path());
    let mut notebook = nb.into_notebook("Introduction");

    let language = notebook
        .store()
        .get_or_insert(egui::Id::new("language"), Language::Python);
    *language.read_mut_in(notebook.store()) = Language::Cpp;
    run_frames(&mut notebook, 1);
    assert_eq!(*language.read_in(notebook.store()), Language::Cpp);
}
