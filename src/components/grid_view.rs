use crate::error::describe_js;
use crate::media::create_element;
use crate::model::{Generation, GridState};
use wasm_bindgen::JsValue;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GridViewProps {
    pub grid: UseReducerHandle<GridState>,
    pub on_loaded: Callback<(Generation, usize)>,
}

#[function_component(GridView)]
pub fn grid_view(props: &GridViewProps) -> Html {
    let generation = props.grid.generation;
    let total = props.grid.cells.len();
    let loaded = total - props.grid.loading_count();
    html! {<>
    <div id="grid-status" style="font-size:11px; opacity:0.7; padding:4px 12px;">{ format!("{} / {} loaded", loaded, total) }</div>
    <div id="supergrid" class="supergrid">
        { for props.grid.cells.iter().enumerate().map(|(index, cell)| html! {
            <GridCellView
                key={format!("{}-{}", generation, index)}
                {generation}
                {index}
                url={cell.media.as_ref().map(|m| AttrValue::from(m.url.clone()))}
                loading={cell.is_loading()}
                failure={cell.failure().map(|r| AttrValue::from(r.to_string()))}
                on_loaded={props.on_loaded.clone()}
            />
        }) }
    </div>
    </>}
}

#[derive(Properties, PartialEq, Clone)]
pub struct GridCellViewProps {
    pub generation: Generation,
    pub index: usize,
    pub url: Option<AttrValue>,
    pub loading: bool,
    pub failure: Option<AttrValue>,
    pub on_loaded: Callback<(Generation, usize)>,
}

/// One grid slot. The media element is built by hand and appended once the
/// cell has a URL; the div itself only carries the `spinner` marker and,
/// for a failed cell, the reason as a tooltip.
#[function_component(GridCellView)]
pub fn grid_cell_view(props: &GridCellViewProps) -> Html {
    let cell_ref = use_node_ref();
    {
        let cell_ref = cell_ref.clone();
        let on_loaded = props.on_loaded.clone();
        let (generation, index) = (props.generation, props.index);
        use_effect_with(props.url.clone(), move |url| {
            if let (Some(url), Some(cell)) = (url.as_ref(), cell_ref.cast::<Element>()) {
                let done = move || on_loaded.emit((generation, index));
                if let Err(e) = attach_media(&cell, url, done) {
                    log::error!("cell {}: could not attach media: {}", index, describe_js(&e));
                }
            }
            || ()
        });
    }
    html! { <div ref={cell_ref} class={classes!("grid-cell", props.loading.then_some("spinner"))} title={props.failure.clone()}></div> }
}

fn attach_media(cell: &Element, url: &str, on_loaded: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let document = cell
        .owner_document()
        .ok_or_else(|| JsValue::from_str("cell has no owner document"))?;
    let media = create_element(&document, url, on_loaded)?;
    cell.append_child(&media)?;
    Ok(())
}
