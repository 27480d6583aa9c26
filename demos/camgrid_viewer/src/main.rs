//! camgrid viewer
//!
//! Connects to a frame feed and shows every live camera in a grid. Build and
//! serve with `trunk serve` from this directory.

mod app;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::mount_to_body(|| leptos::view! { <app::App/> });
}
