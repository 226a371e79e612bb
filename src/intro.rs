//! The introduction notebook: basic input widgets, a generated sample table and an
//! optional CSV upload.

use std::fmt;
use std::path::Path;

use crate::cards::{with_padding, DEFAULT_CARD_PADDING};
use crate::csv::CsvError;
use crate::sample::{write_sample, SampleFile};
use crate::upload::CsvUpload;
use crate::widgets::{self, ChoiceToggle, CsvUploadWidget, Slider, TextField};
use crate::NotebookCtx;

pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 0..=100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Python,
    Java,
    Cpp,
    C,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Python, Language::Java, Language::Cpp, Language::C];

    pub fn label(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registers the introduction cards. `Sample.csv` is written into `sample_dir` once,
/// while the cards are being registered.
pub fn introduction(nb: &mut NotebookCtx, sample_dir: &Path) {
    nb.view(|ctx| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| {
            ctx.heading("Introduction");
            ctx.label("A few inputs, a generated table and a CSV viewer.");
        });
    });

    nb.state("name", String::new(), |ctx, name| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| {
            ctx.horizontal(|ui| {
                widgets::row_label(ui, "Enter Your Name");
                ui.add(TextField::singleline(name).hint_text("Your name"));
            });
            widgets::echo(ctx, "Your Name is", name.as_str());
        });
    });

    nb.state("age", 0_u32, |ctx, age| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| {
            ctx.add(Slider::new(age, AGE_RANGE).text("Enter your age"));
            widgets::echo(ctx, "Your age is", *age);
        });
    });

    nb.state("language", Language::default(), |ctx, language| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| {
            ctx.label("Select Your Favorite Programming language");
            ctx.add(ChoiceToggle::new(language).choices(Language::ALL));
            widgets::echo(ctx, "You selected", *language);
        });
    });

    let sample = write_sample(sample_dir);
    if let Err(err) = &sample {
        tracing::error!(error = %err, "could not write the sample table");
    }
    nb.state("sample", sample, |ctx, sample| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| draw_sample(ctx, sample));
    });

    nb.state("upload", CsvUpload::new(), |ctx, upload| {
        with_padding(ctx, DEFAULT_CARD_PADDING, |ctx| {
            let response = CsvUploadWidget::new(upload).show(ctx);
            if response.selected || response.cleared {
                widgets::reset_dataframe_view(ctx);
            }
            if let Some(table) = response.table {
                ctx.add_space(8.0);
                widgets::dataframe(ctx, table);
            }
        });
    });
}

fn draw_sample(ui: &mut eframe::egui::Ui, sample: &Result<SampleFile, CsvError>) {
    ui.strong("Sample data");
    match sample {
        Ok(sample) => {
            ui.label(format!("Written to {}", sample.path.display()));
            ui.add_space(6.0);
            widgets::dataframe(ui, &sample.frame);
        }
        Err(err) => {
            ui.colored_label(ui.visuals().error_fg_color, err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_keep_their_order_and_labels() {
        let labels: Vec<String> = Language::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Python", "Java", "C++", "C"]);
        assert_eq!(Language::default(), Language::Python);
    }

    #[test]
    fn introduction_writes_the_sample_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut nb = NotebookCtx::new();
        introduction(&mut nb, dir.path());
        assert_eq!(nb.len(), 6);
        assert!(dir.path().join("Sample.csv").is_file());
    }

    #[test]
    fn age_range_spans_zero_to_hundred() {
        assert_eq!(*AGE_RANGE.start(), 0);
        assert_eq!(*AGE_RANGE.end(), 100);
    }
}
