use contracts::dashboards::project_filters::CategoryOption;
use leptos::prelude::*;

use crate::dashboard::state::OptionDimension;

/// MultiSelectDropdown component - checkbox dropdown over a categorical
/// filter dimension
///
/// At most one dropdown is open at a time across the whole dashboard: all
/// instances share a single `open_slot` signal, so opening one closes any
/// other. While open, a full-viewport overlay sits behind the dropdown
/// content; any pointer interaction outside the content lands on it and
/// clears the slot.
#[component]
pub fn MultiSelectDropdown(
    /// Which filter dimension this dropdown edits (also its slot key)
    dimension: OptionDimension,

    /// Shared "which dropdown is open" slot
    open_slot: RwSignal<Option<OptionDimension>>,

    /// Normalized option universe
    #[prop(into)]
    options: Signal<Vec<CategoryOption>>,

    /// Current selection (subset of the universe)
    #[prop(into)]
    selected: Signal<Vec<CategoryOption>>,

    /// Callback when one option is toggled
    on_toggle: Callback<CategoryOption>,

    /// Callback for "Select All"
    on_select_all: Callback<()>,

    /// Callback for "Unselect All"
    on_unselect_all: Callback<()>,
) -> impl IntoView {
    let is_open = move || open_slot.get() == Some(dimension);

    let toggle_open = move |_| {
        open_slot.update(|slot| {
            *slot = if *slot == Some(dimension) {
                None
            } else {
                Some(dimension)
            };
        });
    };

    view! {
        <style>
            "
            .multi-select { position: relative; width: 100%; }
            .multi-select__button {
                display: flex;
                justify-content: space-between;
                align-items: center;
                padding: 0.4rem 0.75rem;
                border: 1px solid var(--colorNeutralStroke1, #d1d1d1);
                border-radius: 4px;
                background: var(--colorNeutralBackground1, #fff);
                cursor: pointer;
                user-select: none;
                font-size: 0.875rem;
            }
            .multi-select__button:hover {
                border-color: var(--colorBrandStroke1, #3b82f6);
            }
            .multi-select__overlay { position: fixed; inset: 0; z-index: 99; }
            .multi-select__content {
                position: absolute;
                left: 0;
                right: 0;
                margin-top: 4px;
                max-height: 300px;
                overflow-y: auto;
                z-index: 100;
                background: var(--colorNeutralBackground1, #fff);
                border: 1px solid var(--colorNeutralStroke1, #d1d1d1);
                border-radius: 4px;
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
            }
            .multi-select__actions {
                display: flex;
                justify-content: space-between;
                padding: 0.4rem;
                border-bottom: 1px solid var(--colorNeutralStroke2, #eee);
                position: sticky;
                top: 0;
                background: var(--colorNeutralBackground1, #fff);
            }
            .multi-select__item {
                display: flex;
                align-items: center;
                gap: 0.5rem;
                padding: 0.4rem 0.75rem;
                cursor: pointer;
                font-size: 0.875rem;
            }
            .multi-select__item:hover {
                background: var(--colorNeutralBackground3, #f3f3f3);
            }
            "
        </style>

        <div class="multi-select">
            <div class="multi-select__button" on:click=toggle_open>
                <span>
                    {move || {
                        format!(
                            "{} of {} selected",
                            selected.with(|s| s.len()),
                            options.with(|o| o.len()),
                        )
                    }}
                </span>
                <span>{move || if is_open() { "▲" } else { "▼" }}</span>
            </div>
            {move || {
                if !is_open() {
                    return view! { <></> }.into_any();
                }
                view! {
                    <div>
                        // Outside pointer interaction lands here and closes
                        // the dropdown.
                        <div
                            class="multi-select__overlay"
                            on:mousedown=move |_| open_slot.set(None)
                        ></div>
                        <div class="multi-select__content">
                            <div class="multi-select__actions">
                                <button
                                    class="button button--primary"
                                    on:click=move |_| on_select_all.run(())
                                >
                                    "Select All"
                                </button>
                                <button
                                    class="button button--secondary"
                                    on:click=move |_| on_unselect_all.run(())
                                >
                                    "Unselect All"
                                </button>
                            </div>
                            {options.get().into_iter().map(|option| {
                                let value = option.value.clone();
                                let label = option.label.clone();
                                let checked = move || {
                                    selected.with(|s| s.iter().any(|o| o.value == value))
                                };
                                view! {
                                    <label class="multi-select__item">
                                        <input
                                            type="checkbox"
                                            prop:checked=checked
                                            on:change=move |_| on_toggle.run(option.clone())
                                        />
                                        <span>{label}</span>
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
