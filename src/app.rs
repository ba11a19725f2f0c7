use eframe::egui;
use std::time::Duration;
use tracing::{debug, error};

use crate::assistant::CodeAssistant;
use crate::config::Config;
use crate::history::InputHistory;
use crate::session::{EntryKind, Session};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(10, 10, 10);
const TERMINAL_FILL: egui::Color32 = egui::Color32::BLACK;
const BORDER: egui::Color32 = egui::Color32::from_rgb(51, 51, 51);
const SYSTEM_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 255); // Cyan
const INPUT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0); // Yellow
const OUTPUT_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0); // Green
const PROCESSING_COLOR: egui::Color32 = egui::Color32::from_rgb(136, 136, 136);
const FOOTER_COLOR: egui::Color32 = egui::Color32::from_rgb(102, 102, 102);

const FOOTER: &str = "Type \"help\" for available commands | Press Enter to execute";

// Keeps the "Processing..." line and the answer showing up promptly.
const BUSY_REPAINT: Duration = Duration::from_millis(50);

pub struct CoderApp {
    session: Session,
    assistant: CodeAssistant,
    history: InputHistory,
    font_size: f32,
    // Set whenever the prompt should grab keyboard focus once it is enabled.
    refocus: bool,
}

impl CoderApp {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(config.banner.clone()),
            assistant: CodeAssistant::new(config.delay),
            history: InputHistory::default(),
            font_size: config.font_size,
            refocus: true,
        }
    }

    fn mono(&self) -> egui::FontId {
        egui::FontId::monospace(self.font_size)
    }

    fn edit(&mut self, text: String) {
        self.session = std::mem::take(&mut self.session).edit(text);
    }

    fn submit(&mut self, text: &str) {
        // Enter drops the text edit's focus even when nothing is accepted.
        self.refocus = true;

        let (session, accepted) = std::mem::take(&mut self.session).submit(text);
        self.session = session;

        let Some(command) = accepted else {
            return;
        };
        debug!(command = %command, "command accepted");
        self.history.record(&command);

        if let Err(err) = self.assistant.request(command) {
            error!(%err, "assistant refused a command the session accepted");
        }
    }

    fn collect_resolution(&mut self) {
        if let Some(resolution) = self.assistant.poll() {
            self.session = std::mem::take(&mut self.session).complete(resolution);
            debug!(
                entries = self.session.transcript().len(),
                "resolution applied"
            );
        }
    }

    fn recall(&mut self, key: egui::Key) {
        let recalled = match key {
            egui::Key::ArrowUp => self.history.older(),
            egui::Key::ArrowDown => self.history.newer(),
            _ => None,
        };
        if let Some(text) = recalled.map(str::to_owned) {
            self.edit(text);
        }
    }

    fn show_transcript(&self, ui: &mut egui::Ui) {
        for entry in self.session.transcript().iter() {
            let color = match entry.kind() {
                EntryKind::System => SYSTEM_COLOR,
                EntryKind::Input => INPUT_COLOR,
                EntryKind::Output => OUTPUT_COLOR,
            };
            ui.label(
                egui::RichText::new(entry.text())
                    .font(self.mono())
                    .color(color),
            );
            ui.add_space(10.0);
        }

        if self.session.is_busy() {
            ui.label(
                egui::RichText::new("Processing...")
                    .font(self.mono())
                    .color(PROCESSING_COLOR),
            );
        }
    }

    fn show_prompt(&mut self, ui: &mut egui::Ui) {
        let busy = self.session.is_busy();
        let mut draft = self.session.pending_input().to_owned();

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(">").font(self.mono()).color(OUTPUT_COLOR));

            let placeholder = if busy { "" } else { "Enter command..." };
            let response = ui.add_enabled(
                !busy,
                egui::TextEdit::singleline(&mut draft)
                    .font(self.mono())
                    .text_color(OUTPUT_COLOR)
                    .hint_text(placeholder)
                    .frame(false)
                    .desired_width(f32::INFINITY),
            );

            if response.changed() {
                self.edit(draft.clone());
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit(&draft);
            } else if response.has_focus() {
                for key in [egui::Key::ArrowUp, egui::Key::ArrowDown] {
                    if ui.input(|i| i.key_pressed(key)) {
                        self.recall(key);
                    }
                }
            }

            if self.refocus && !self.session.is_busy() {
                response.request_focus();
                self.refocus = false;
            }
        });
    }
}

impl eframe::App for CoderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_resolution();
        if self.session.is_busy() || self.assistant.is_pending() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(egui::Margin::same(10.0)))
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(FOOTER)
                            .font(egui::FontId::monospace(12.0))
                            .color(FOOTER_COLOR),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(egui::Margin::same(20.0)))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(TERMINAL_FILL)
                    .stroke(egui::Stroke::new(1.0, BORDER))
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::same(20.0))
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .stick_to_bottom(true)
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                ui.with_layout(
                                    egui::Layout::top_down_justified(egui::Align::LEFT),
                                    |ui| {
                                        self.show_transcript(ui);
                                        self.show_prompt(ui);
                                    },
                                );
                            });
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> CoderApp {
        let mut app = CoderApp::new(&Config::default());
        app.refocus = false;
        app
    }

    #[test]
    fn blank_enter_keeps_the_prompt_focused() {
        let mut app = app();
        app.submit("   ");

        assert!(app.refocus);
        assert!(!app.session.is_busy());
        assert_eq!(app.session.transcript().len(), 1);
        assert!(!app.assistant.is_pending());
    }

    #[tokio::test]
    async fn accepted_command_goes_to_the_assistant() {
        let mut app = app();
        app.submit("express server");

        assert!(app.refocus);
        assert!(app.session.is_busy());
        assert!(app.assistant.is_pending());
        assert_eq!(app.history.older(), Some("express server"));
    }

    #[tokio::test]
    async fn submit_while_busy_is_ignored_but_refocuses() {
        let mut app = app();
        app.submit("help");
        app.refocus = false;
        app.submit("api endpoint");

        assert!(app.refocus);
        assert_eq!(app.session.transcript().len(), 2);
        assert_eq!(app.history.older(), Some("help"));
    }
}
