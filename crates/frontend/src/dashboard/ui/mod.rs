use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::dashboards::project_filters::CategoryOption;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboard::api;
use crate::dashboard::normalize::NormalizedData;
use crate::dashboard::state::{
    CompletionFlag, FilterState, OptionDimension, RangeDimension, RangeHandle, DEFAULT_RANGE,
};
use crate::dashboard::{DashboardError, SubmitStatus};
use crate::shared::components::{DateRangeInputs, MultiSelectDropdown, RangeSlider};

fn universe_of(domain: &Option<NormalizedData>, dimension: OptionDimension) -> Vec<CategoryOption> {
    domain
        .as_ref()
        .map(|d| match dimension {
            OptionDimension::Divisions => d.options.divisions.clone(),
            OptionDimension::WbsCategory => d.options.wbs_categories.clone(),
        })
        .unwrap_or_default()
}

/// Project analytics filter dashboard
///
/// One `FilterState` snapshot drives every control; each user event replaces
/// the snapshot atomically. Until the initial load finishes the controls
/// operate on the placeholder defaults.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = RwSignal::new(FilterState::default());
    let domain = RwSignal::new(None::<NormalizedData>);
    // Shared slot: at most one dropdown is open at a time.
    let open_dropdown = RwSignal::new(None::<OptionDimension>);
    let load_error = RwSignal::new(None::<String>);
    let submit_status = RwSignal::new(SubmitStatus::Idle);

    // Results arriving after teardown are discarded, never applied.
    let disposed = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let disposed = disposed.clone();
        move || disposed.store(true, Ordering::Relaxed)
    });

    // Initial load: fetch both tables, normalize, reconcile exactly once.
    {
        let disposed = disposed.clone();
        spawn_local(async move {
            match api::load_domain().await {
                Ok(data) => {
                    if disposed.load(Ordering::Relaxed) {
                        return;
                    }
                    let previous = domain.get_untracked();
                    state.update(|s| *s = s.reconciled(previous.as_ref(), &data));
                    domain.set(Some(data));
                }
                Err(err) => {
                    if disposed.load(Ordering::Relaxed) {
                        return;
                    }
                    log!("Failed to load filter domains: {}", err);
                    load_error.set(Some(err.to_string()));
                }
            }
        });
    }

    // Range slider adapters
    let range_bounds = move |dimension: RangeDimension| {
        Signal::derive(move || {
            domain.with(|d| {
                d.as_ref()
                    .map(|d| match dimension {
                        RangeDimension::Phase => (d.ranges.phase.min, d.ranges.phase.max),
                        RangeDimension::Duration => (d.ranges.duration.min, d.ranges.duration.max),
                    })
                    .unwrap_or(DEFAULT_RANGE)
            })
        })
    };
    let range_value = move |dimension: RangeDimension| {
        Signal::derive(move || state.with(|s| s.range(dimension)))
    };
    let on_range = move |dimension: RangeDimension| {
        Callback::new(move |(handle, value): (RangeHandle, f64)| {
            state.update(|s| {
                let (min, max) = s.range(dimension);
                let values = match handle {
                    RangeHandle::Min => (value, max),
                    RangeHandle::Max => (min, value),
                };
                *s = s.with_range(dimension, values, handle);
            });
        })
    };

    // Multi-select adapters
    let option_universe = move |dimension: OptionDimension| {
        Signal::derive(move || domain.with(|d| universe_of(d, dimension)))
    };
    let option_selection = move |dimension: OptionDimension| {
        Signal::derive(move || state.with(|s| s.selection(dimension).to_vec()))
    };
    let on_option_toggle = move |dimension: OptionDimension| {
        Callback::new(move |option: CategoryOption| {
            state.update(|s| *s = s.with_option_toggled(dimension, &option));
        })
    };
    let on_select_all = move |dimension: OptionDimension| {
        Callback::new(move |_: ()| {
            let all = domain.with_untracked(|d| universe_of(d, dimension));
            state.update(|s| *s = s.with_all_selected(dimension, &all));
        })
    };
    let on_unselect_all = move |dimension: OptionDimension| {
        Callback::new(move |_: ()| {
            state.update(|s| *s = s.with_none_selected(dimension));
        })
    };

    // Completion flag adapter
    let completion_checked = move |flag: CompletionFlag| {
        move || {
            state.with(|s| match flag {
                CompletionFlag::Completed => s.completed,
                CompletionFlag::Incompleted => s.incompleted,
            })
        }
    };

    // Date range adapter
    let date_bounds = Signal::derive(move || {
        domain.with(|d| d.as_ref().map(|d| d.ranges.dates).unwrap_or_default())
    });
    let on_dates = Callback::new(move |(start, end)| {
        state.update(|s| *s = s.with_date_range(start, end));
    });

    // Submission: at most one in-flight request; the pending status blocks a
    // second dispatch locally, before any network call.
    let on_submit = {
        let disposed = disposed.clone();
        move |_: ()| {
            if submit_status.get_untracked().is_pending() {
                return;
            }
            submit_status.set(SubmitStatus::Pending);
            let payload = state.get_untracked().payload();
            let disposed = disposed.clone();
            spawn_local(async move {
                let result = api::submit_filters(&payload).await;
                if disposed.load(Ordering::Relaxed) {
                    return;
                }
                match result {
                    Ok(response) => submit_status.set(SubmitStatus::Done(response.items.len())),
                    Err(DashboardError::EmptyResult) => submit_status.set(SubmitStatus::Empty),
                    Err(err) => submit_status.set(SubmitStatus::Failed(err.to_string())),
                }
            });
        }
    };

    view! {
        <style>
            "
            .dashboard {
                max-width: 720px;
                margin: 0 auto;
                padding: 0.75rem;
                display: flex;
                flex-direction: column;
                gap: 0.5rem;
            }
            .dashboard__title { font-size: 1.25rem; margin: 0 0 0.5rem 0; }
            .filter-section {
                border: 1px solid var(--colorNeutralStroke1, #d1d1d1);
                border-radius: 8px;
                padding: 0.5rem 0.75rem;
                background: var(--colorNeutralBackground1, #fff);
            }
            .filter-section__title { font-size: 0.9rem; margin: 0 0 0.3rem 0; }
            .dashboard__banner {
                padding: 8px 12px;
                border: 1px solid #ffc107;
                border-radius: 4px;
                background: #fff3cd;
                font-size: 0.875rem;
            }
            "
        </style>

        <div class="dashboard">
            <h1 class="dashboard__title">"Project Analytics Interface"</h1>

            {move || load_error.get().map(|message| view! {
                <div class="dashboard__banner">{message}</div>
            })}

            <div class="filter-section">
                <h3 class="filter-section__title">"Phase Range"</h3>
                <RangeSlider
                    bounds=range_bounds(RangeDimension::Phase)
                    value=range_value(RangeDimension::Phase)
                    on_change=on_range(RangeDimension::Phase)
                />
            </div>

            <div class="filter-section">
                <h3 class="filter-section__title">"Division"</h3>
                <MultiSelectDropdown
                    dimension=OptionDimension::Divisions
                    open_slot=open_dropdown
                    options=option_universe(OptionDimension::Divisions)
                    selected=option_selection(OptionDimension::Divisions)
                    on_toggle=on_option_toggle(OptionDimension::Divisions)
                    on_select_all=on_select_all(OptionDimension::Divisions)
                    on_unselect_all=on_unselect_all(OptionDimension::Divisions)
                />
            </div>

            <div class="filter-section">
                <h3 class="filter-section__title">"WBS Category"</h3>
                <MultiSelectDropdown
                    dimension=OptionDimension::WbsCategory
                    open_slot=open_dropdown
                    options=option_universe(OptionDimension::WbsCategory)
                    selected=option_selection(OptionDimension::WbsCategory)
                    on_toggle=on_option_toggle(OptionDimension::WbsCategory)
                    on_select_all=on_select_all(OptionDimension::WbsCategory)
                    on_unselect_all=on_unselect_all(OptionDimension::WbsCategory)
                />
            </div>

            <div class="filter-section">
                <h3 class="filter-section__title">"Duration Range"</h3>
                <RangeSlider
                    bounds=range_bounds(RangeDimension::Duration)
                    value=range_value(RangeDimension::Duration)
                    on_change=on_range(RangeDimension::Duration)
                />
            </div>

            <div class="filter-section">
                <h3 class="filter-section__title">"Completion Status"</h3>
                <Flex gap=FlexGap::Large align=FlexAlign::Center>
                    <label style="display: flex; align-items: center; gap: 0.5rem; cursor: pointer;">
                        <input
                            type="checkbox"
                            prop:checked=completion_checked(CompletionFlag::Completed)
                            on:change=move |_| {
                                state.update(|s| *s = s.with_completion_toggled(CompletionFlag::Completed));
                            }
                        />
                        <span>"Completed"</span>
                    </label>
                    <label style="display: flex; align-items: center; gap: 0.5rem; cursor: pointer;">
                        <input
                            type="checkbox"
                            prop:checked=completion_checked(CompletionFlag::Incompleted)
                            on:change=move |_| {
                                state.update(|s| *s = s.with_completion_toggled(CompletionFlag::Incompleted));
                            }
                        />
                        <span>"Incompleted"</span>
                    </label>
                </Flex>
            </div>

            <div class="filter-section">
                <h3 class="filter-section__title">"Date Range"</h3>
                <DateRangeInputs
                    start=Signal::derive(move || state.with(|s| s.start_date))
                    end=Signal::derive(move || state.with(|s| s.end_date))
                    bounds=date_bounds
                    on_change=on_dates
                />
            </div>

            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit(())
                >
                    {move || {
                        if submit_status.get().is_pending() { "Submitting..." } else { "Submit" }
                    }}
                </Button>
                {move || match submit_status.get() {
                    SubmitStatus::Idle | SubmitStatus::Pending => view! { <></> }.into_any(),
                    SubmitStatus::Done(count) => view! {
                        <span style="font-size: 0.875rem; color: #2e7d32;">
                            {format!("Received {} analyzed items", count)}
                        </span>
                    }.into_any(),
                    SubmitStatus::Empty => view! {
                        <span style="font-size: 0.875rem; color: #8a6d3b;">
                            {DashboardError::EmptyResult.to_string()}
                        </span>
                    }.into_any(),
                    SubmitStatus::Failed(message) => view! {
                        <span style="font-size: 0.875rem; color: red;">{message}</span>
                    }.into_any(),
                }}
            </Flex>
        </div>
    }
}
