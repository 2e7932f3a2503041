use macroquad::prelude::*;
use genmap::GenMap;

use stales_figure_editor::{
    common_traits::*,
    config::EditorConfig,
    figure::Figure,
    point::{pt, Point},
    utils,
};

use std::{env, process};

mod command;
use command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Idle,
    Drawing(genmap::Handle),
}

pub struct State {
    pub figures: GenMap<Figure>,
    /// Insertion order; hit tests walk it front to back.
    pub order: Vec<genmap::Handle>,
    pub config: EditorConfig,
    pub input_mode: InputMode,
    pub selected: Option<genmap::Handle>,
    pub clear_color: Color,
    pub default_color: Color,
    pub prev_mouse_pos: (f32, f32),
    canvas: Image,
    texture: Texture2D,
    dirty: bool,
}

impl State {
    fn new(config: EditorConfig) -> Self {
        let clear_color = Color::new(0.08, 0.08, 0.1, 1.0);
        let canvas = Image::gen_image_color(config.width as u16, config.height as u16, clear_color);
        let texture = Texture2D::from_image(&canvas);
        texture.set_filter(FilterMode::Nearest);
        Self {
            figures: GenMap::with_capacity(64),
            order: vec![],
            input_mode: InputMode::Idle,
            selected: None,
            clear_color,
            default_color: utils::contrasting(clear_color),
            prev_mouse_pos: mouse_position(),
            canvas,
            texture,
            dirty: true,
            config,
        }
    }

    fn figures_in_order(&self) -> impl Iterator<Item = (genmap::Handle, &Figure)> {
        self.order.iter().filter_map(|h| self.figures.get(*h).map(|f| (*h, f)))
    }

    fn run(&mut self, cmd: &dyn Command<State>) {
        log::debug!("running {cmd:?}");
        match cmd.run(self) {
            Ok(()) => self.dirty = true,
            Err(e) => log::warn!("{cmd:?} failed: {e}"),
        }
    }

    /// Turns a left click into an edit.
    fn click(&mut self, at: Point) {
        if let InputMode::Drawing(handle) = self.input_mode {
            let closes = self.figures
                             .get(handle)
                             .map_or(false, |f| f.vertex_count() > 2 && f.find_vertex_near(at) == Some(f.first_vertex()));
            if closes {
                self.run(&command::FinishFigure);
            } else {
                self.run(&command::AddVertex { figure: handle, at });
            }
            return;
        }

        let edge_hit = self.figures_in_order().find_map(|(h, f)| {
            if f.find_vertex_near(at).is_some() { return None; }
            f.find_edge_near(at, f.vertex_radius().max(4)).map(|edge| (h, edge))
        });
        if let Some((figure, edge)) = edge_hit {
            self.run(&command::InsertVertex { figure, at, edge });
            return;
        }

        let vertex_hit = self.figures_in_order().find(|(_, f)| f.find_vertex_near(at).is_some()).map(|(h, _)| h);
        let inside_hit = self.figures_in_order().find(|(_, f)| f.contains_point(at)).map(|(h, _)| h);
        match vertex_hit.or(inside_hit) {
            Some(h) => self.run(&command::Select(Some(h))),
            None => self.run(&command::NewFigure { at }),
        }
    }

    fn redraw(&mut self) {
        if !self.dirty { return; }
        self.canvas = Image::gen_image_color(self.canvas.width, self.canvas.height, self.clear_color);
        for handle in &self.order {
            if let Some(figure) = self.figures.get(*handle) {
                figure.render(&mut self.canvas, self.config.show_vertices);
            }
        }
        self.texture.update(&self.canvas);
        self.dirty = false;
    }

    fn text_digest(&self) -> String {
        let figure_cnt = self.order.len();
        let vertex_cnt = self.figures_in_order().map(|(_, f)| f.vertex_count()).sum::<usize>();
        let frametime = get_frame_time();
        format!(r"
num. of figures: {figure_cnt}
num. of vertices: {vertex_cnt}
input mode: {:?}
frametime: {frametime}
", self.input_mode)
    }
}

#[macroquad::main("figure-editor")]
async fn main() {
    let config = match EditorConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("figure-editor: {e}");
            eprintln!("usage: figure-editor [width] [height] [thickness] [verbosity]");
            process::exit(2);
        }
    };

    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("stales_figure_editor")
        .verbosity(config.verbosity)
        .init()
    {
        eprintln!("figure-editor: couldn't set up logging: {e}");
    }

    request_new_screen_size(config.width as f32, config.height as f32);
    log::info!("{}x{} canvas, stroke thickness {}", config.width, config.height, config.stroke_thickness);

    let mut state = State::new(config);

    loop {
        if is_quit_requested() { break }
        clear_background(state.clear_color);

        { // input handling
            let mouse_pos = mouse_position();
            if mouse_pos != state.prev_mouse_pos {
                log::trace!("pos {},{}", mouse_pos.0, mouse_pos.1);
                state.prev_mouse_pos = mouse_pos;
            }
            let at = pt(mouse_pos.0 as i32, mouse_pos.1 as i32);

            if is_mouse_button_pressed(MouseButton::Left) {
                log::debug!("clicked {},{}", at.x, at.y);
                state.click(at);
            }
            if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                state.run(&command::FinishFigure);
            }
            if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
                if let Some(figure) = state.selected {
                    state.run(&command::RemoveFigure { figure });
                }
            }
            if is_key_pressed(KeyCode::V) {
                state.config.show_vertices = !state.config.show_vertices;
                state.dirty = true;
            }
            if is_key_pressed(KeyCode::K) {
                state.config.random_colors = !state.config.random_colors;
                log::info!("random colours {}", if state.config.random_colors { "on" } else { "off" });
            }
            if let Some(figure) = state.selected {
                if is_key_pressed(KeyCode::T) {
                    state.run(&command::Thicken { figure });
                }
                if is_key_pressed(KeyCode::C) {
                    state.run(&command::Recolor { figure });
                }
            }
        }

        state.redraw();
        draw_texture(&state.texture, 0.0, 0.0, WHITE);

        if let Some(figure) = state.selected.and_then(|h| state.figures.get(h)) {
            let aabb = figure.compute_aabb();
            draw_rectangle_lines(aabb.min.x as f32, aabb.min.y as f32,
                                 aabb.width() as f32, aabb.height() as f32,
                                 1.0, GRAY);
        }

        draw_text(&format!("Input mode: {:?}", state.input_mode), 20.0, 20.0, 24.0, DARKGRAY);

        if is_key_released(KeyCode::R) {
            println!("{}", state.text_digest())
        }
        next_frame().await
    }
}
