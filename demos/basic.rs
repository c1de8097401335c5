//! Standalone demo: a color wheel, its variants and a couple of captions.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_paintkit::{color_variants, color_wheel, fit_label, hyperlink, LabelLayout, SolidColor};

fn main() {
    env_logger::init();

    let color = RwSignal::new(SolidColor::from_hex("3B82F6").unwrap());

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    color_wheel(color).style(|s| s.width(200.0).height(200.0)),
                    color_variants(color).style(|s| s.width(74.0).height(74.0)),
                    fit_label(
                        move || format!("Selected {}", color.get().to_hex()),
                        14.0,
                        LabelLayout::AutoFitCaption,
                    )
                    .style(|s| s.width(120.0).height(20.0)),
                    fit_label(
                        || "Apply Gaussian Blur Filter".to_string(),
                        14.0,
                        LabelLayout::AutoFitCaption,
                    )
                    .style(|s| s.width(80.0).height(20.0)),
                    hyperlink(
                        || "Reset to white".to_string(),
                        move || color.set(SolidColor::WHITE),
                    )
                    .style(|s| s.width(120.0).height(20.0)),
                ))
                .style(|s| s.padding(12.0).gap(8.0))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((232.0, 400.0))
                    .title("floem-paintkit"),
            ),
        )
        .run();
}
