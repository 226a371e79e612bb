mod button;
mod choice_toggle;
mod dataframe;
mod field;
mod label;
mod slider;
mod upload;

pub use button::Button;
pub use choice_toggle::ChoiceToggle;
pub use dataframe::{dataframe, reset_dataframe_view};
pub use field::TextField;
pub use label::{echo, echo_text, row_label};
pub use slider::Slider;
pub use upload::{CsvUploadResponse, CsvUploadWidget, UPLOAD_LABEL};
