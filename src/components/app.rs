use super::{controls_panel::ControlsPanel, grid_view::GridView};
use crate::config::{ENDPOINTS, Endpoint, Settings};
use crate::model::{Generation, GridAction, GridRequestConfig, GridState};
use crate::populate::{ReducerSurface, populate};
use crate::transport::FetchTransport;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let grid = use_reducer(GridState::default);
    let next_generation = use_mut_ref(|| 0 as Generation);
    let settings = use_state(Settings::load);
    let transport = use_memo((), |_| FetchTransport);

    // Persist the cell count whenever it changes
    {
        let settings = settings.clone();
        use_effect_with(settings.cell_count, move |_| {
            settings.save();
            || ()
        });
    }

    // Cell count is read from the current settings at click time.
    let trigger = {
        let grid = grid.clone();
        let next_generation = next_generation.clone();
        let transport = transport.clone();
        let cell_count = settings.cell_count;
        Callback::from(move |endpoint: Endpoint| {
            let config = GridRequestConfig {
                endpoint_url: endpoint.url.to_string(),
                parser: endpoint.parser,
                cell_count,
            };
            let surface = ReducerSurface {
                grid: grid.clone(),
                next_generation: next_generation.clone(),
            };
            populate(&config, &transport, &surface, |fut| spawn_local(fut));
        })
    };

    // Initial fill on mount
    {
        let trigger = trigger.clone();
        use_effect_with((), move |_| {
            trigger.emit(ENDPOINTS[0]);
            || ()
        });
    }

    let on_cell_count = {
        let settings = settings.clone();
        Callback::from(move |cell_count: usize| settings.set(Settings { cell_count }))
    };

    let on_loaded = {
        let grid = grid.clone();
        Callback::from(move |(generation, index): (Generation, usize)| {
            grid.dispatch(GridAction::Loaded { generation, index })
        })
    };

    html! {
        <div id="root">
            <ControlsPanel cell_count={settings.cell_count} {on_cell_count} on_trigger={trigger} />
            <GridView grid={grid.clone()} {on_loaded} />
        </div>
    }
}
