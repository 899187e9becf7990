mod app;
mod assets;
mod geometry;
mod render;
mod scene;
mod ui;

fn main() {
    app::run();
}
