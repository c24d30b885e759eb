use chrono::NaiveDate;
use scheduling::{parse_date_key, ActiveDay, AvailabilityEditor, AvailabilityMap, SchedulePolicy};
use std::collections::{BTreeMap, BTreeSet};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeSelectionPanelProps {
    pub selected_days: Vec<NaiveDate>,
    pub availability: AvailabilityMap,
    pub on_close: Callback<()>,
    pub on_save: Callback<BTreeMap<String, Vec<String>>>,
}

fn day_label(key: &str) -> String {
    parse_date_key(key)
        .map(|date| date.format("%b %d").to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Panel for assigning time slots to the selected days before saving.
#[function_component(TimeSelectionPanel)]
pub fn time_selection_panel(props: &TimeSelectionPanelProps) -> Html {
    let policy = SchedulePolicy::default();
    let editor = use_state({
        let days = props.selected_days.clone();
        let availability = props.availability.clone();
        let policy = policy.clone();
        move || AvailabilityEditor::new(&days, &availability, &policy)
    });

    let on_toggle = {
        let editor = editor.clone();
        Callback::from(move |time: String| {
            let mut next = (*editor).clone();
            next.toggle(&time);
            editor.set(next);
        })
    };

    let on_activate = {
        let editor = editor.clone();
        Callback::from(move |active: ActiveDay| {
            let mut next = (*editor).clone();
            next.set_active(active);
            editor.set(next);
        })
    };

    let on_save_click = {
        let editor = editor.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(editor.commit()))
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let day_keys = editor.day_keys();

    // Offer the standard catalog plus whatever the edited days already carry
    let mut offered: BTreeSet<String> = policy.standard_slots.iter().cloned().collect();
    for key in &day_keys {
        offered.extend(editor.times_for(key));
    }

    let day_filters = {
        let all_button = if day_keys.len() > 1 {
            let is_active = editor.active() == &ActiveDay::All;
            let on_activate = on_activate.clone();
            html! {
                <button
                    class={classes!("day-filter", is_active.then_some("active"))}
                    onclick={Callback::from(move |_: MouseEvent| on_activate.emit(ActiveDay::All))}
                >
                    {"All days"}
                </button>
            }
        } else {
            html! {}
        };

        let per_day = day_keys.iter().map(|key| {
            let is_active = editor.active() == &ActiveDay::Day(key.clone());
            let on_activate = on_activate.clone();
            let key_for_click = key.clone();
            html! {
                <button
                    class={classes!("day-filter", is_active.then_some("active"))}
                    onclick={Callback::from(move |_: MouseEvent| {
                        on_activate.emit(ActiveDay::Day(key_for_click.clone()))
                    })}
                    key={key.clone()}
                >
                    {day_label(key)}
                </button>
            }
        });

        html! {
            <div class="day-filters">
                {all_button}
                {for per_day}
            </div>
        }
    };

    let time_buttons = offered.iter().map(|time| {
        let selected = editor.is_selected(time);
        let on_toggle = on_toggle.clone();
        let time_for_click = time.clone();
        html! {
            <button
                class={classes!("time-slot", selected.then_some("selected"))}
                onclick={Callback::from(move |_: MouseEvent| {
                    on_toggle.emit(time_for_click.clone())
                })}
                key={time.clone()}
            >
                {time}
            </button>
        }
    });

    let hint = match editor.active() {
        ActiveDay::All => "Click to add or remove a time from every selected day.",
        ActiveDay::Day(_) => "Click to toggle a time for this day.",
    };

    html! {
        <div class="panel-overlay">
            <div class="time-panel">
                <div class="panel-header">
                    <h3>{"Set available times"}</h3>
                    <button class="close-btn" onclick={on_close_click.clone()}>{"×"}</button>
                </div>

                <div class="panel-body">
                    <p class="panel-hint">{"Edit the times for:"}</p>
                    {day_filters}
                    <p class="panel-hint">{hint}</p>
                    <div class="time-grid">
                        {for time_buttons}
                    </div>
                </div>

                <div class="panel-footer">
                    <button class="btn" onclick={on_close_click}>{"Cancel"}</button>
                    <button class="btn btn-primary" onclick={on_save_click}>
                        {"Confirm and save"}
                    </button>
                </div>
            </div>
        </div>
    }
}
