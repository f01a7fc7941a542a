use crate::app::{App, Message, Model, ToastLevel};
use crate::export::ExportOutcome;
use crate::session::SaveOutcome;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => Self::save(model),
            Message::NewDocument if model.new_document_requested => {
                model.new_document_requested = false;
                match model.session.new_document() {
                    Ok(_) => model.show_toast(ToastLevel::Info, "New document"),
                    Err(err) => {
                        tracing::warn!(%err, "saving new document failed");
                        model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                    }
                }
                model.follow_caret();
            }
            Message::OpenFile(path) => match model.session.open_file(path) {
                Ok(true) => {
                    model.follow_caret();
                    let name = path
                        .file_name()
                        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                    model.show_toast(ToastLevel::Info, format!("Opened {name}"));
                }
                Ok(false) => {
                    model.show_toast(ToastLevel::Warning, "Not a markdown or text file");
                }
                Err(err) => {
                    tracing::warn!(%err, "import failed");
                    model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                }
            },
            Message::Export(format, stem) => {
                match model.session.export(*format, &model.export_dir, stem) {
                    Ok(ExportOutcome::Written(path)) => {
                        model.show_toast(ToastLevel::Info, format!("Exported {}", path.display()));
                    }
                    Ok(ExportOutcome::Printed(_)) => {
                        model.show_toast(ToastLevel::Info, "Sent to the browser for printing");
                    }
                    Err(err) => {
                        tracing::warn!(%err, "export failed");
                        model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                    }
                }
            }
            Message::ToggleTheme => {
                if let Err(err) = model.session.toggle_theme() {
                    tracing::warn!(%err, "storing theme failed");
                    model.show_toast(ToastLevel::Warning, format!("Theme not saved: {err}"));
                }
                model.sync_preview();
            }
            _ => {}
        }
    }

    fn save(model: &mut Model) {
        match model.session.save() {
            Ok(SaveOutcome::Written) => model.show_toast(ToastLevel::Info, "Saved"),
            Ok(SaveOutcome::Unchanged) => model.show_toast(ToastLevel::Info, "Already saved"),
            Err(err) => {
                tracing::warn!(%err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
