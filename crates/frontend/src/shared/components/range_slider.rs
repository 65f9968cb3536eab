use leptos::prelude::*;

use crate::dashboard::state::RangeHandle;

/// RangeSlider component - dual-handle slider over a bounded numeric domain
///
/// Each handle reports `(handle, value)` upward on input; the consistency
/// rule (dragging past the other handle pushes it along) lives in the state
/// store, not here.
#[component]
pub fn RangeSlider(
    /// Domain bounds (min, max) the handles move within
    #[prop(into)]
    bounds: Signal<(f64, f64)>,

    /// Currently selected (min, max) pair
    #[prop(into)]
    value: Signal<(f64, f64)>,

    /// Callback with the moved handle and its new value
    on_change: Callback<(RangeHandle, f64)>,
) -> impl IntoView {
    let percent = move |v: f64| {
        let (lo, hi) = bounds.get();
        if hi <= lo {
            return 0.0;
        }
        ((v - lo) / (hi - lo) * 100.0).clamp(0.0, 100.0)
    };

    let progress_style = move || {
        let (min, max) = value.get();
        format!(
            "left: {:.2}%; width: {:.2}%;",
            percent(min),
            percent(max) - percent(min)
        )
    };

    let handle_input = move |handle: RangeHandle, ev: &leptos::ev::Event| {
        if let Ok(parsed) = event_target_value(ev).parse::<f64>() {
            on_change.run((handle, parsed));
        }
    };

    view! {
        <style>
            "
            .range-slider { position: relative; padding: 0.5rem 0 0.25rem; }
            .range-slider__track {
                position: relative;
                height: 6px;
                background: var(--colorNeutralStroke2, #e0e0e0);
                border-radius: 3px;
            }
            .range-slider__progress {
                position: absolute;
                top: 0;
                height: 100%;
                border-radius: 3px;
                background: var(--colorBrandStroke1, #3b82f6);
                opacity: 0.5;
            }
            .range-slider input[type=\"range\"] {
                position: absolute;
                top: 0.5rem;
                left: 0;
                width: 100%;
                height: 6px;
                margin: 0;
                background: none;
                -webkit-appearance: none;
                appearance: none;
                pointer-events: none;
            }
            .range-slider input[type=\"range\"]::-webkit-slider-thumb {
                -webkit-appearance: none;
                appearance: none;
                pointer-events: auto;
                width: 18px;
                height: 18px;
                border-radius: 50%;
                background: var(--colorBrandStroke1, #3b82f6);
                cursor: pointer;
            }
            .range-slider input[type=\"range\"]::-moz-range-thumb {
                pointer-events: auto;
                width: 18px;
                height: 18px;
                border: none;
                border-radius: 50%;
                background: var(--colorBrandStroke1, #3b82f6);
                cursor: pointer;
            }
            .range-slider__values {
                margin-top: 1.25rem;
                text-align: center;
                font-size: 0.875rem;
            }
            "
        </style>

        <div class="range-slider">
            <div class="range-slider__track">
                <div class="range-slider__progress" style=progress_style></div>
            </div>
            <input
                type="range"
                min=move || bounds.get().0.to_string()
                max=move || bounds.get().1.to_string()
                step="1"
                prop:value=move || value.get().0.to_string()
                on:input=move |ev| handle_input(RangeHandle::Min, &ev)
            />
            <input
                type="range"
                min=move || bounds.get().0.to_string()
                max=move || bounds.get().1.to_string()
                step="1"
                prop:value=move || value.get().1.to_string()
                on:input=move |ev| handle_input(RangeHandle::Max, &ev)
            />
            <div class="range-slider__values">
                {move || {
                    let (min, max) = value.get();
                    format!("{} - {}", format_value(min), format_value(max))
                }}
            </div>
        </div>
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_values_render_without_decimals() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(7.5), "7.5");
        assert_eq!(format_value(0.0), "0");
    }
}
