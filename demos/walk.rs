use macroquad::prelude::*;
use macroquad_sheet_anim::{decode_manifest_file, AnimationSet};

fn window_conf() -> Conf {
    Conf {
        window_title: "Walk Cycle".into(),
        window_width: 640,
        window_height: 360,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let manifest = decode_manifest_file("assets/hero.json").expect("Failed to load manifest");
    let texture = load_texture("assets/hero.png")
        .await
        .expect("Failed to load texture");
    texture.set_filter(FilterMode::Nearest);

    let mut hero = AnimationSet::from_manifest(texture, manifest).expect("Invalid manifest");
    if hero.state().is_none() {
        hero.switch("idle");
    }

    loop {
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::Left) {
            hero.switch("walk");
        } else {
            hero.switch("idle");
        }

        hero.update_frame().expect("hero has an active clip");

        clear_background(DARKGRAY);
        hero.draw(screen_width() / 2.0, screen_height() / 2.0)
            .expect("hero has an active clip");

        draw_text(
            &format!("clip: {}", hero.state().unwrap_or("-")),
            20.0,
            30.0,
            24.0,
            WHITE,
        );

        next_frame().await;
    }
}
