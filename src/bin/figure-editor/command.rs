use std::fmt::{self, Display};

use log::info;
use stales_figure_editor::{
    config::MAX_THICKNESS,
    figure::Figure,
    geom::EdgeRef,
    point::Point,
    utils,
};

use crate::{InputMode, State};

#[derive(Debug)]
pub struct CommandError(String);

impl Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CommandError {}

pub type CommandResult = Result<(), CommandError>;

/// An edit the UI asks the editor state to perform.
pub trait Command<T>: fmt::Debug {
    fn run(&self, state: &mut T) -> CommandResult;
}

fn figure_mut(state: &mut State, handle: genmap::Handle) -> Result<&mut Figure, CommandError> {
    state.figures
         .get_mut(handle)
         .ok_or_else(|| CommandError(format!("no figure {handle:?}")))
}

#[derive(Debug, Clone)]
pub struct NewFigure {
    pub at: Point,
}

impl Command<State> for NewFigure {
    fn run(&self, state: &mut State) -> CommandResult {
        let color = if state.config.random_colors { utils::random_color() } else { state.default_color };
        let handle = state.figures.insert(Figure::new(self.at, color, state.config.stroke_thickness));
        state.order.push(handle);
        state.input_mode = InputMode::Drawing(handle);
        state.selected = Some(handle);
        info!("started figure {handle:?} at {:?}", self.at);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AddVertex {
    pub figure: genmap::Handle,
    pub at: Point,
}

impl Command<State> for AddVertex {
    fn run(&self, state: &mut State) -> CommandResult {
        figure_mut(state, self.figure)?.add_vertex(self.at);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InsertVertex {
    pub figure: genmap::Handle,
    pub at: Point,
    pub edge: EdgeRef,
}

impl Command<State> for InsertVertex {
    fn run(&self, state: &mut State) -> CommandResult {
        figure_mut(state, self.figure)?.insert_vertex_on_edge(self.at, self.edge);
        state.selected = Some(self.figure);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FinishFigure;

impl Command<State> for FinishFigure {
    fn run(&self, state: &mut State) -> CommandResult {
        if let InputMode::Drawing(handle) = state.input_mode {
            let count = figure_mut(state, handle)?.vertex_count();
            info!("finished figure {handle:?} with {count} vertices");
        }
        state.input_mode = InputMode::Idle;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Select(pub Option<genmap::Handle>);

impl Command<State> for Select {
    fn run(&self, state: &mut State) -> CommandResult {
        if let Some(handle) = self.0 {
            figure_mut(state, handle)?;
        }
        state.selected = self.0;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RemoveFigure {
    pub figure: genmap::Handle,
}

impl Command<State> for RemoveFigure {
    fn run(&self, state: &mut State) -> CommandResult {
        state.figures
             .remove(self.figure)
             .ok_or_else(|| CommandError(format!("no figure {:?}", self.figure)))?;
        state.order.retain(|h| *h != self.figure);
        if state.selected == Some(self.figure) {
            state.selected = None;
        }
        if state.input_mode == InputMode::Drawing(self.figure) {
            state.input_mode = InputMode::Idle;
        }
        info!("removed figure {:?}", self.figure);
        Ok(())
    }
}

/// Cycles the stroke of a figure through `1..=MAX_THICKNESS`.
#[derive(Debug, Clone)]
pub struct Thicken {
    pub figure: genmap::Handle,
}

impl Command<State> for Thicken {
    fn run(&self, state: &mut State) -> CommandResult {
        let figure = figure_mut(state, self.figure)?;
        let thickness = figure.stroke_thickness() % MAX_THICKNESS + 1;
        figure.set_stroke_thickness(thickness);
        info!("figure {:?} now {thickness} px wide", self.figure);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Recolor {
    pub figure: genmap::Handle,
}

impl Command<State> for Recolor {
    fn run(&self, state: &mut State) -> CommandResult {
        let color = if state.config.random_colors { utils::random_color() } else { state.default_color };
        let figure = figure_mut(state, self.figure)?;
        info!("recoloring {:?} from {:?} to {color:?}", self.figure, figure.color());
        figure.set_color(color);
        Ok(())
    }
}
