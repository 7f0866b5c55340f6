use crate::chat::Mode;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub panel: Color,
    pub text_color: Color,
    pub muted_text: Color,
    pub border_color: Color,
    pub user_bubble: Color,
    pub bot_bubble: Color,
    pub bubble_text: Color,
    pub error_text_color: Color,
    pub launcher: Color,
    pub resume_job: Color,
    pub resume_job_active: Color,
    pub job_match: Color,
    pub job_match_active: Color,
    pub info: Color,
    pub info_active: Color,
}

impl Theme {
    pub fn light_panel() -> Self {
        Self {
            background: Color::Rgb(40, 44, 52),         // #282c34
            foreground: Color::Rgb(171, 178, 191),      // #abb2bf
            panel: Color::Rgb(255, 255, 255),           // #ffffff
            text_color: Color::Rgb(255, 255, 255),      // #ffffff
            muted_text: Color::Rgb(108, 117, 125),      // #6c757d
            border_color: Color::Rgb(204, 204, 204),    // #cccccc
            user_bubble: Color::Rgb(233, 236, 239),     // #e9ecef
            bot_bubble: Color::Rgb(209, 231, 221),      // #d1e7dd
            bubble_text: Color::Rgb(0, 0, 0),           // #000000
            error_text_color: Color::Rgb(224, 108, 117), // #e06c75
            launcher: Color::Rgb(0, 0, 0),              // #000000
            resume_job: Color::Rgb(0, 123, 255),        // #007bff
            resume_job_active: Color::Rgb(0, 86, 179),  // #0056b3
            job_match: Color::Rgb(40, 167, 69),         // #28a745
            job_match_active: Color::Rgb(25, 105, 44),  // #19692c
            info: Color::Rgb(111, 66, 193),             // #6f42c1
            info_active: Color::Rgb(76, 44, 146),       // #4c2c92
        }
    }

    pub fn mode_color(&self, mode: Mode, active: bool) -> Color {
        match (mode, active) {
            (Mode::ResumeJob, false) => self.resume_job,
            (Mode::ResumeJob, true) => self.resume_job_active,
            (Mode::JobMatch, false) => self.job_match,
            (Mode::JobMatch, true) => self.job_match_active,
            (Mode::Info, false) => self.info,
            (Mode::Info, true) => self.info_active,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light_panel()
    }
}
