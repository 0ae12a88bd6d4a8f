// src/ui/dialogue_text/systems.rs
//
// Systems for spawning the dialogue text panel and rendering reveal progress.

use bevy::prelude::*;

use crate::dialogue::settings::DialogueSettings;

use super::components::{
    fit_font_size, DialogueHiddenSpan, DialogueTextPanel, DialogueTextSink,
};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.05, 0.05, 0.08, 0.85);
const TEXT_COLOR: Color = Color::WHITE;

/// Spawn the camera and the bottom-anchored dialogue panel.
///
/// The panel's text entity carries the `DialogueTextSink`; its single child
/// span holds the unrevealed remainder in a transparent colour so wrapping
/// is computed against the full line.
pub fn spawn_dialogue_text(mut commands: Commands, settings: Res<DialogueSettings>) {
    let display = &settings.display;

    commands.spawn(Camera2d);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(display.bottom_offset),
                left: Val::Px(display.side_offset),
                right: Val::Px(display.side_offset),
                padding: UiRect::all(Val::Px(display.padding)),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            DialogueTextPanel,
        ))
        .with_children(|panel| {
            panel
                .spawn((
                    Text::new(""),
                    TextFont {
                        font_size: display.max_font_size,
                        ..default()
                    },
                    TextColor(TEXT_COLOR),
                    DialogueTextSink::default(),
                ))
                .with_children(|text| {
                    text.spawn((
                        TextSpan::new(""),
                        TextFont {
                            font_size: display.max_font_size,
                            ..default()
                        },
                        TextColor(Color::NONE),
                        DialogueHiddenSpan,
                    ));
                });
        });

    info!("Dialogue text panel spawned");
}

/// Copy sink state into the text entities whenever the sink changes.
pub fn render_dialogue_text(
    settings: Res<DialogueSettings>,
    mut texts: Query<
        (&DialogueTextSink, &mut Text, &mut TextFont, &Children),
        Changed<DialogueTextSink>,
    >,
    mut spans: Query<
        (&mut TextSpan, &mut TextFont),
        (With<DialogueHiddenSpan>, Without<DialogueTextSink>),
    >,
) {
    for (sink, mut text, mut font, children) in texts.iter_mut() {
        let font_size = fit_font_size(sink.char_count(), &settings.display);
        if font.font_size != font_size {
            font.font_size = font_size;
        }

        if text.0 != sink.visible_text() {
            text.0 = sink.visible_text().to_string();
        }

        let children: &[Entity] = children;
        for &child in children {
            let Ok((mut span, mut span_font)) = spans.get_mut(child) else {
                continue;
            };
            if span.0 != sink.hidden_text() {
                span.0 = sink.hidden_text().to_string();
            }
            if span_font.font_size != font_size {
                span_font.font_size = font_size;
            }
        }
    }
}
