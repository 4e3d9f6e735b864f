use super::super::{Model, Msg, Page};
use shared::AnalysisMode;
use strum::IntoEnumIterator;
use yew::html::Scope;
use yew::prelude::*;

/// Renders the application header with one tab per page
pub fn render_header(page: Page, link: &Scope<Model>) -> Html {
    let tab = |target: Page, label: &'static str| {
        html! {
            <li
                class={classes!("nav-tab", (page == target).then_some("active"))}
                onclick={link.callback(move |_| Msg::SelectPage(target))}
            >
                { label }
            </li>
        }
    };

    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-chart-line"></i> {" Product Analytics Dashboard"}</h1>
            <nav>
                <ul class="nav-tabs">
                    { tab(Page::Visualization, "Visualization") }
                    { for AnalysisMode::iter().map(|mode| tab(Page::Analysis(mode), mode.title())) }
                </ul>
            </nav>
        </header>
    }
}
