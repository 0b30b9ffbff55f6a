use crate::config::{ENDPOINTS, Endpoint, MAX_CELLS, parse_cell_count};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const PRESSED_MS: i32 = 500;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub cell_count: usize,
    pub on_cell_count: Callback<usize>,
    pub on_trigger: Callback<Endpoint>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let pressed = use_state(|| None::<usize>);

    let count_cb = {
        let cb = props.on_cell_count.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(n) = parse_cell_count(&input.value()) {
                cb.emit(n);
            }
        })
    };

    let buttons = ENDPOINTS.iter().enumerate().map(|(i, endpoint)| {
        let endpoint = *endpoint;
        let onclick = {
            let cb = props.on_trigger.clone();
            let pressed = pressed.clone();
            Callback::from(move |_| {
                pressed.set(Some(i));
                cb.emit(endpoint);
                // Drop the pressed look again after a short delay.
                let pressed = pressed.clone();
                let release = Closure::once_into_js(move || pressed.set(None));
                if let Some(win) = web_sys::window() {
                    if win
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            release.unchecked_ref(),
                            PRESSED_MS,
                        )
                        .is_err()
                    {
                        log::warn!("could not schedule button release");
                    }
                }
            })
        };
        let class = classes!("button", (*pressed == Some(i)).then_some("button--pressed"));
        html! { <button {class} {onclick}>{ endpoint.label }</button> }
    });

    html! {<div id="controls" style="display:flex; flex-wrap:wrap; align-items:center; gap:8px; padding:12px; background:rgba(22,27,34,0.9); border-bottom:1px solid #30363d;">
        { for buttons }
        <label style="display:flex; align-items:center; gap:6px; margin-left:auto; font-size:13px;">
            <span>{"How many?"}</span>
            <input id="how-many" type="number" min="0" max={MAX_CELLS.to_string()}
                value={props.cell_count.to_string()} oninput={count_cb} style="width:64px;" />
        </label>
    </div>}
}
