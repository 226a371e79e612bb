use eframe::egui::{self, Align, FontId, Layout, Margin, RichText, TextStyle};
use egui_extras::{Column, TableBuilder};
use polars::prelude::{
    AnyValue, DataFrame, IdxCa, IdxSize, IntoSeries, NamedFrom, SortMultipleOptions,
};

use crate::widgets::{Button, TextField};

const ROW_ID_COLUMN: &str = "__introbook_row_id";

/// Renders `df` as a striped table with a text filter and click-to-sort headers.
///
/// Filter and sort state live in egui's temporary memory under the current `Ui` id, so
/// two tables in different cards do not share it.
pub fn dataframe(ui: &mut egui::Ui, df: &DataFrame) {
    let nr_cols = df.width();
    let nr_rows = df.height();
    if nr_cols == 0 {
        ui.label("Empty dataframe");
        return;
    }
    let cols: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let visuals = ui.visuals();
    let header_text = visuals.widgets.noninteractive.fg_stroke.color;
    let body_text = visuals.widgets.inactive.fg_stroke.color;
    let summary_color = crate::themes::blend(body_text, visuals.panel_fill, 0.55);
    let base_mono = ui
        .style()
        .text_styles
        .get(&TextStyle::Monospace)
        .map(|font| font.size)
        .unwrap_or(14.0);
    let body_font = FontId::monospace((base_mono - 2.0).max(9.0));
    let header_font = FontId::monospace(base_mono.max(10.0));
    let row_height = ui.fonts_mut(|fonts| fonts.row_height(&body_font)).max(10.0) + 4.0;
    let header_height = ui.fonts_mut(|fonts| fonts.row_height(&header_font)) + 6.0;

    let view_id = view_state_id(ui);
    let view = ui
        .data_mut(|data| data.get_temp::<DataframeViewState>(view_id))
        .unwrap_or_default();
    let mut next_view = view.clone();

    egui::Frame::new()
        .inner_margin(Margin::same(4))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(RichText::new("Filter").color(summary_color));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let clear_enabled = !next_view.query.is_empty();
                    if ui
                        .add_enabled(clear_enabled, Button::new("clear").small())
                        .clicked()
                    {
                        next_view.query.clear();
                    }
                    ui.add(
                        TextField::singleline(&mut next_view.query)
                            .desired_width(ui.available_width().max(120.0)),
                    );
                });
            });

            let order = row_order(df, &view.query, view.sort);
            let display_rows = order.len();
            let summary = if view.query.trim().is_empty() {
                format!("{nr_rows} rows × {nr_cols} columns")
            } else {
                format!("{display_rows} of {nr_rows} rows × {nr_cols} columns")
            };
            ui.add_space(4.0);
            ui.label(RichText::new(summary).color(summary_color));
            ui.add_space(4.0);

            TableBuilder::new(ui)
                .id_salt(view_id)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::remainder().at_least(48.0).clip(true), nr_cols)
                .header(header_height, |mut header| {
                    for (col_idx, head) in cols.iter().enumerate() {
                        header.col(|ui| {
                            let marker = match view.sort {
                                Some(key) if key.column == col_idx && key.descending => " ↓",
                                Some(key) if key.column == col_idx => " ↑",
                                _ => "",
                            };
                            let response = ui.add(
                                egui::Label::new(
                                    RichText::new(format!("{head}{marker}"))
                                        .color(header_text)
                                        .font(header_font.clone())
                                        .strong(),
                                )
                                .sense(egui::Sense::click()),
                            );
                            if response.clicked() {
                                next_view.sort = next_sort(view.sort, col_idx);
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, display_rows, |mut row| {
                        let row_index = order[row.index()];
                        for col in &cols {
                            row.col(|ui| {
                                let text = df
                                    .column(col.as_str())
                                    .and_then(|column| column.get(row_index))
                                    .map(|value| cell_text(&value))
                                    .unwrap_or_default();
                                ui.label(RichText::new(text).color(body_text).font(body_font.clone()));
                            });
                        }
                    });
                });

            if !view.query.trim().is_empty() && display_rows == 0 {
                ui.add_space(6.0);
                ui.label(RichText::new("No rows match this filter").color(summary_color));
            }
        });

    if next_view != view {
        ui.data_mut(|data| data.insert_temp(view_id, next_view));
    }
}

fn view_state_id(ui: &egui::Ui) -> egui::Id {
    ui.id().with("dataframe_view_state")
}

/// Forgets the filter and sort of the table drawn by `dataframe` in this `Ui`.
pub fn reset_dataframe_view(ui: &egui::Ui) {
    let view_id = view_state_id(ui);
    ui.data_mut(|data| data.remove::<DataframeViewState>(view_id));
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        value => value.str_value().into_owned(),
    }
}

/// Header click cycle: ascending, descending, unsorted. Another column starts ascending.
pub(crate) fn next_sort(current: Option<SortKey>, column: usize) -> Option<SortKey> {
    match current {
        Some(key) if key.column == column && !key.descending => Some(SortKey {
            column,
            descending: true,
        }),
        Some(key) if key.column == column => None,
        _ => Some(SortKey {
            column,
            descending: false,
        }),
    }
}

/// Indices of the rows to display: rows whose text contains `query` (case-insensitive),
/// ordered by `sort` when given and by position otherwise.
pub(crate) fn row_order(df: &DataFrame, query: &str, sort: Option<SortKey>) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    let mut order: Vec<usize> = (0..df.height()).collect();

    if !query.is_empty() {
        order.retain(|&row_index| {
            df.get_columns().iter().any(|column| {
                column
                    .get(row_index)
                    .map(|value| cell_text(&value).to_lowercase().contains(&query))
                    .unwrap_or(false)
            })
        });
    }

    let Some(key) = sort else {
        return order;
    };
    let Some(sort_col) = df.get_column_names().get(key.column).map(|name| (*name).clone()) else {
        return order;
    };
    if order.is_empty() {
        return order;
    }

    let idx_values: Vec<IdxSize> = order.iter().map(|&value| value as IdxSize).collect();
    let idx = IdxCa::new("idx".into(), idx_values.clone());
    let Ok(mut subset) = df.take(&idx) else {
        return order;
    };
    let row_ids = IdxCa::new(ROW_ID_COLUMN.into(), idx_values);
    if subset.with_column(row_ids.into_series()).is_err() {
        return order;
    }
    let options = SortMultipleOptions::new()
        .with_order_descending(key.descending)
        .with_maintain_order(true);
    if let Ok(sorted) = subset.sort(vec![sort_col], options) {
        if let Ok(ids) = sorted.column(ROW_ID_COLUMN).and_then(|column| column.idx().cloned()) {
            order = ids.into_no_null_iter().map(|value| value as usize).collect();
        }
    }
    order
}

#[derive(Clone, Default, PartialEq)]
struct DataframeViewState {
    query: String,
    sort: Option<SortKey>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SortKey {
    pub column: usize,
    pub descending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn people() -> DataFrame {
        df!(
            "Name" => ["Cleo", "Ada", "Bob"],
            "Age" => [41_i64, 29, 35],
            "City" => ["San Jose", "Dallas", "San Diego"]
        )
        .unwrap()
    }

    #[test]
    fn unfiltered_unsorted_keeps_positions() {
        assert_eq!(row_order(&people(), "", None), vec![0, 1, 2]);
    }

    #[test]
    fn filter_matches_any_column_case_insensitively() {
        assert_eq!(row_order(&people(), "  SAN ", None), vec![0, 2]);
        assert_eq!(row_order(&people(), "29", None), vec![1]);
        assert!(row_order(&people(), "nobody", None).is_empty());
    }

    #[test]
    fn sort_orders_by_column() {
        let ascending = Some(SortKey {
            column: 1,
            descending: false,
        });
        let descending = Some(SortKey {
            column: 1,
            descending: true,
        });
        assert_eq!(row_order(&people(), "", ascending), vec![1, 2, 0]);
        assert_eq!(row_order(&people(), "", descending), vec![0, 2, 1]);
        assert_eq!(row_order(&people(), "san", descending), vec![0, 2]);
    }

    #[test]
    fn header_clicks_cycle_sort() {
        let first = next_sort(None, 2);
        assert_eq!(
            first,
            Some(SortKey {
                column: 2,
                descending: false
            })
        );
        let second = next_sort(first, 2);
        assert_eq!(
            second,
            Some(SortKey {
                column: 2,
                descending: true
            })
        );
        assert_eq!(next_sort(second, 2), None);
        assert_eq!(
            next_sort(second, 0),
            Some(SortKey {
                column: 0,
                descending: false
            })
        );
    }
}
