//! File picker for the file-to-ClickHouse direction. The file is read in the
//! browser; its header line provides the offered columns.

use common::error::ValidationError;
use common::model::file::{display_delimiter, parse_delimiter, UploadedFile};
use common::model::selection::ColumnSelection;
use gloo_file::futures::read_as_bytes;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{column_checklist, inline_error, spinner, StepReport};

pub enum Msg {
    Choose(web_sys::File),
    Read(String, Result<Vec<u8>, String>),
    EditDelimiter(String),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub file: Option<UploadedFile>,
    pub selection: ColumnSelection,
    pub on_report: Callback<StepReport>,
}

pub struct FileStep {
    /// Raw delimiter input.
    delimiter: String,
    reading: bool,
    error: Option<String>,
}

impl Component for FileStep {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            delimiter: ctx
                .props()
                .file
                .as_ref()
                .map(|f| display_delimiter(f.delimiter()))
                .unwrap_or_else(|| ",".to_string()),
            reading: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Choose(file) => {
                if self.reading {
                    return false;
                }
                self.reading = true;
                self.error = None;
                let file = gloo_file::File::from(file);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = read_as_bytes(&file).await.map_err(|e| e.to_string());
                    link.send_message(Msg::Read(file.name(), result));
                });
                true
            }
            Msg::Read(name, result) => {
                self.reading = false;
                match result {
                    Ok(bytes) => {
                        let uploaded = UploadedFile::detect(name, bytes);
                        if uploaded.is_empty() {
                            self.error = Some(ValidationError::NoFileSelected.to_string());
                        } else {
                            self.delimiter = display_delimiter(uploaded.delimiter());
                            ctx.props().on_report.emit(StepReport::FileSelected(uploaded));
                        }
                    }
                    Err(err) => {
                        log::warn!("reading {} failed: {}", name, err);
                        self.error = Some(format!("Could not read {}: {}", name, err));
                    }
                }
                true
            }
            Msg::EditDelimiter(value) => {
                match parse_delimiter(&value) {
                    Ok(delimiter) => {
                        self.error = None;
                        ctx.props()
                            .on_report
                            .emit(StepReport::DelimiterChanged(delimiter));
                    }
                    Err(err) => self.error = Some(err.to_string()),
                }
                self.delimiter = value;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        let onchange = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input
                .files()
                .and_then(|files| files.get(0))
                .map(Msg::Choose)
        });
        let on_delimiter = link.callback(|e: InputEvent| {
            Msg::EditDelimiter(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <div class="file-step">
                <div class="toolbar">
                    <label class="file-picker">
                        <i class="material-icons">{"upload_file"}</i>
                        <span>{"Choose file"}</span>
                        <input type="file" accept=".csv,.tsv,.txt" {onchange} disabled={self.reading} />
                    </label>
                    <label class="form-field inline">
                        <span>{"Delimiter"}</span>
                        <input
                            type="text"
                            class="delimiter"
                            maxlength="3"
                            value={self.delimiter.clone()}
                            oninput={on_delimiter}
                        />
                    </label>
                </div>

                if self.reading {
                    { spinner("Reading file...") }
                }
                { inline_error(self.error.as_deref()) }

                if let Some(file) = &props.file {
                    <>
                        <div class="hint">
                            { format!("{} ({} bytes)", file.file_name(), file.bytes().len()) }
                        </div>
                        if props.selection.available().is_empty() {
                            <div class="empty">{"No columns found in the header line"}</div>
                        } else {
                            { column_checklist(&props.selection, &props.on_report) }
                        }
                    </>
                }
            </div>
        }
    }
}
