//! Application root component.

use leptos::prelude::*;

use camgrid_client::{CameraGrid, FeedConfig, FrameFeedProvider, use_feed_context};

const CONFIG_ELEMENT_ID: &str = "camgrid-config";

/// Read `FeedConfig` overrides from the JSON block in `index.html`.
fn load_config() -> FeedConfig {
    let Some(raw) = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        log::info!("no #{CONFIG_ELEMENT_ID} block, using default feed config");
        return FeedConfig::default();
    };

    match FeedConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::error!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            FeedConfig::default()
        }
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::info!("feed endpoint: {}", config.url);

    view! {
        <FrameFeedProvider config=config>
            <CameraGrid/>
            // Headless component to surface feed errors in the console
            <FeedErrorLogger/>
        </FrameFeedProvider>
    }
}

#[component]
fn FeedErrorLogger() -> impl IntoView {
    let last_error = use_feed_context().last_error;

    Effect::new(move |_| {
        if let Some(e) = last_error.get() {
            log::warn!("feed error: {e}");
        }
    });

    view! {}
}
