pub mod celebration;
pub mod layout;
mod play;
mod result;
mod setup;
mod status;

use ratatui::Frame;

use crate::app::App;
use crate::models::Screen;

pub use layout::{calculate_option_cells, calculate_play_chunks, calculate_result_chunks};
pub use play::draw_play;
pub use result::draw_result;
pub use setup::draw_setup;
pub use status::{draw_error, draw_loading};

/// Render whichever screen the session is on.
pub fn draw(f: &mut Frame, app: &App) {
    match app.session().screen() {
        Screen::Setup => draw_setup(f, &app.setup, &app.config().model.model),
        Screen::Loading => draw_loading(f, app.tick()),
        Screen::Playing => {
            if let Some(play) = app.play() {
                draw_play(f, play);
            }
        }
        Screen::Finished => {
            draw_result(f, app.session().final_score());
            if let Some(celebration) = app.celebration() {
                let area = f.area();
                celebration.render(area, f.buffer_mut());
            }
        }
        Screen::Error => draw_error(f, app.session().error_message()),
    }
}
