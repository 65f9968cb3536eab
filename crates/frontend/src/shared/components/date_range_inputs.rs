use chrono::NaiveDate;
use contracts::dashboards::project_filters::DateBounds;
use leptos::prelude::*;

use crate::dashboard::normalize::parse_date;

/// DateRangeInputs component - paired start/end date inputs
///
/// Endpoints are reported verbatim: either may be cleared and no ordering
/// is enforced between the two, unlike the numeric range sliders.
#[component]
pub fn DateRangeInputs(
    /// Selected start date
    #[prop(into)]
    start: Signal<Option<NaiveDate>>,

    /// Selected end date
    #[prop(into)]
    end: Signal<Option<NaiveDate>>,

    /// Normalized date bounds of the data set
    #[prop(into)]
    bounds: Signal<DateBounds>,

    /// Callback with the new (start, end) pair
    on_change: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,
) -> impl IntoView {
    let input_style = "padding: 6px 8px; border: 1px solid var(--colorNeutralStroke1, #d1d1d1); \
         border-radius: 4px; font-size: 0.875rem; background: var(--colorNeutralBackground1, #fff); \
         width: 140px;";

    view! {
        <div style="display: flex; align-items: center; gap: 0.5rem;">
            <input
                type="date"
                prop:value=move || date_value(start.get())
                min=move || date_value(bounds.get().min)
                max=move || date_value(bounds.get().max)
                style=input_style
                on:input=move |ev| {
                    let parsed = parse_date(&event_target_value(&ev));
                    on_change.run((parsed, end.get_untracked()));
                }
            />
            <div>"—"</div>
            <input
                type="date"
                prop:value=move || date_value(end.get())
                min=move || date_value(bounds.get().min)
                max=move || date_value(bounds.get().max)
                style=input_style
                on:input=move |ev| {
                    let parsed = parse_date(&event_target_value(&ev));
                    on_change.run((start.get_untracked(), parsed));
                }
            />
        </div>
    }
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
