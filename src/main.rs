mod components;
mod content;
mod model;
mod state;
mod tooltip;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
