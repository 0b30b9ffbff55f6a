//! Grid population: reset the surface, then fill every cell from its own
//! independent request.

use crate::error::FetchError;
use crate::model::{Generation, GridAction, GridRequestConfig, GridState, MediaDescriptor};
use crate::parser::ResponseParser;
use crate::transport::Transport;
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;
use yew::UseReducerHandle;

/// Where populate writes its cells.
pub trait GridSurface: Clone + 'static {
    /// Drops every cell and creates `cell_count` loading cells.
    fn reset(&self, cell_count: usize) -> Generation;
    fn fill(&self, generation: Generation, index: usize, descriptor: MediaDescriptor);
    fn abandon(&self, generation: Generation, index: usize, error: &FetchError);
}

/// Surface backed by the view's reducer.
#[derive(Clone)]
pub struct ReducerSurface {
    pub grid: UseReducerHandle<GridState>,
    pub next_generation: Rc<RefCell<Generation>>,
}

impl GridSurface for ReducerSurface {
    fn reset(&self, cell_count: usize) -> Generation {
        let generation = {
            let mut next = self.next_generation.borrow_mut();
            *next += 1;
            *next
        };
        self.grid.dispatch(GridAction::Reset {
            generation,
            cell_count,
        });
        generation
    }

    fn fill(&self, generation: Generation, index: usize, descriptor: MediaDescriptor) {
        self.grid.dispatch(GridAction::Fill {
            generation,
            index,
            descriptor,
        });
    }

    fn abandon(&self, generation: Generation, index: usize, error: &FetchError) {
        self.grid.dispatch(GridAction::Abandon {
            generation,
            index,
            reason: error.to_string(),
        });
    }
}

/// Plain shared state, for driving populate without a component tree.
#[cfg(test)]
impl GridSurface for Rc<RefCell<GridState>> {
    fn reset(&self, cell_count: usize) -> Generation {
        let mut state = self.borrow_mut();
        let generation = state.generation + 1;
        state.apply(GridAction::Reset {
            generation,
            cell_count,
        });
        generation
    }

    fn fill(&self, generation: Generation, index: usize, descriptor: MediaDescriptor) {
        self.borrow_mut().apply(GridAction::Fill {
            generation,
            index,
            descriptor,
        });
    }

    fn abandon(&self, generation: Generation, index: usize, error: &FetchError) {
        self.borrow_mut().apply(GridAction::Abandon {
            generation,
            index,
            reason: error.to_string(),
        });
    }
}

/// Clears `surface`, creates `config.cell_count` loading cells and starts
/// one request per cell through `spawn`. Returns immediately; failures are
/// logged per cell and never reach the caller.
pub fn populate<T, S>(
    config: &GridRequestConfig,
    transport: &Rc<T>,
    surface: &S,
    spawn: impl Fn(LocalBoxFuture<'static, ()>),
) -> Generation
where
    T: Transport + 'static,
    S: GridSurface,
{
    let generation = surface.reset(config.cell_count);
    log::debug!(
        "populating {} cells from {} (generation {})",
        config.cell_count,
        config.endpoint_url,
        generation
    );
    for index in 0..config.cell_count {
        spawn(
            fill_cell(
                transport.clone(),
                surface.clone(),
                config.endpoint_url.clone(),
                config.parser,
                generation,
                index,
            )
            .boxed_local(),
        );
    }
    generation
}

async fn fill_cell<T, S>(
    transport: Rc<T>,
    surface: S,
    endpoint_url: String,
    parser: ResponseParser,
    generation: Generation,
    index: usize,
) where
    T: Transport + 'static,
    S: GridSurface,
{
    match fetch_descriptor(&*transport, &endpoint_url, parser).await {
        Ok(descriptor) => surface.fill(generation, index, descriptor),
        Err(e) => {
            log::error!("cell {} of generation {}: {}", index, generation, e);
            surface.abandon(generation, index, &e);
        }
    }
}

pub async fn fetch_descriptor<T: Transport + ?Sized>(
    transport: &T,
    endpoint_url: &str,
    parser: ResponseParser,
) -> Result<MediaDescriptor, FetchError> {
    if endpoint_url.is_empty() {
        return Err(FetchError::EmptyEndpoint);
    }
    let raw = transport.get(endpoint_url, parser.reads_body()).await?;
    parser.parse(raw)?.resolve()
}
