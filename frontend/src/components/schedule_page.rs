use chrono::{Local, NaiveDate};
use gloo::timers::future::TimeoutFuture;
use scheduling::{
    assemble_day_detail, date_key, DaySelection, SchedulePolicy, ScheduleService, SelectionGuard,
    SelectionMode,
};
use shared::Role;
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{ContinuousCalendar, DayDetailPanel, TimeSelectionPanel, Toast};
use crate::hooks::use_schedule;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct SchedulePageProps {
    pub api: ApiClient,
    pub role: Role,
    /// Whose appointments to show.
    pub subject_id: String,
    /// Whose availability to show (same as `subject_id` for psychologists).
    pub psychologist_id: String,
}

/// The schedule screen: the continuous calendar, the selection workflow for
/// publishing availability, and the day detail / time assignment panels.
#[function_component(SchedulePage)]
pub fn schedule_page(props: &SchedulePageProps) -> Html {
    let schedule = use_schedule(&props.api, props.role, &props.subject_id, &props.psychologist_id);
    let selection = use_state(|| Option::<DaySelection>::None);
    let editor_days = use_state(|| Option::<Vec<NaiveDate>>::None);
    let viewing_day = use_state(|| Option::<NaiveDate>::None);
    let toast = use_state(|| Option::<String>::None);

    let today = Local::now().date_naive();
    let policy = SchedulePolicy::default();

    let show_toast = {
        let toast = toast.clone();
        Callback::from(move |message: String| {
            toast.set(Some(message));
            let toast = toast.clone();
            spawn_local(async move {
                TimeoutFuture::new(3_000).await;
                toast.set(None);
            });
        })
    };

    let on_enter_selection = {
        let selection = selection.clone();
        let viewing_day = viewing_day.clone();
        Callback::from(move |_: MouseEvent| {
            viewing_day.set(None);
            selection.set(Some(DaySelection::new()));
        })
    };

    let on_toggle_mode = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(current) = &*selection {
                let mut next = current.clone();
                next.toggle_mode();
                selection.set(Some(next));
            }
        })
    };

    let on_cancel_selection = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| selection.set(None))
    };

    let on_pending_select = {
        let selection = selection.clone();
        let availability = schedule.state.availability.clone();
        Callback::from(move |day: NaiveDate| {
            if let Some(current) = &*selection {
                let mut next = current.clone();
                let policy = SchedulePolicy::default();
                let guard = SelectionGuard {
                    today: Local::now().date_naive(),
                    availability: &availability,
                    policy: &policy,
                };
                next.select(day, &guard);
                selection.set(Some(next));
            }
        })
    };

    let on_proceed = {
        let selection = selection.clone();
        let editor_days = editor_days.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(current) = &*selection {
                if !current.is_empty() {
                    editor_days.set(Some(current.days()));
                    selection.set(None);
                }
            }
        })
    };

    let on_day_click = {
        let viewing_day = viewing_day.clone();
        Callback::from(move |day: NaiveDate| viewing_day.set(Some(day)))
    };

    let on_close_detail = {
        let viewing_day = viewing_day.clone();
        Callback::from(move |_| viewing_day.set(None))
    };

    let on_edit = {
        let editor_days = editor_days.clone();
        let viewing_day = viewing_day.clone();
        Callback::from(move |_| {
            if let Some(day) = *viewing_day {
                editor_days.set(Some(vec![day]));
                viewing_day.set(None);
            }
        })
    };

    let on_block = {
        let api = props.api.clone();
        let slot_index = schedule.state.slot_index.clone();
        let viewing_day = viewing_day.clone();
        let refresh = schedule.refresh.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |day: NaiveDate| {
            let api = api.clone();
            let slot_index = slot_index.clone();
            let viewing_day = viewing_day.clone();
            let refresh = refresh.clone();
            let show_toast = show_toast.clone();
            spawn_local(async move {
                let service = ScheduleService::new(api, SchedulePolicy::default());
                match service.block_day(day, &slot_index).await {
                    Ok(_) => {
                        viewing_day.set(None);
                        refresh.emit(());
                        show_toast.emit("Day blocked.".to_string());
                    }
                    Err(e) => show_toast.emit(format!("Could not block the day: {}", e)),
                }
            });
        })
    };

    let on_save = {
        let api = props.api.clone();
        let psychologist_id = props.psychologist_id.clone();
        let slot_index = schedule.state.slot_index.clone();
        let availability = schedule.state.availability.clone();
        let editor_days = editor_days.clone();
        let viewing_day = viewing_day.clone();
        let refresh = schedule.refresh.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |diff: BTreeMap<String, Vec<String>>| {
            // A single already-published day means this save is an edit;
            // reopen its detail panel afterwards
            let edit_day = editor_days
                .as_ref()
                .and_then(|days| (days.len() == 1).then(|| days[0]))
                .filter(|day| availability.is_published(&date_key(*day)));

            let api = api.clone();
            let psychologist_id = psychologist_id.clone();
            let slot_index = slot_index.clone();
            let editor_days = editor_days.clone();
            let viewing_day = viewing_day.clone();
            let refresh = refresh.clone();
            let show_toast = show_toast.clone();
            spawn_local(async move {
                let service = ScheduleService::new(api, SchedulePolicy::default());
                match service
                    .publish_availability(&psychologist_id, &diff, &slot_index)
                    .await
                {
                    Ok(_) => {
                        editor_days.set(None);
                        refresh.emit(());
                        if let Some(day) = edit_day {
                            viewing_day.set(Some(day));
                            show_toast.emit("Times updated!".to_string());
                        } else {
                            show_toast.emit("New times published!".to_string());
                        }
                    }
                    // The panel stays open with its selection, so the save
                    // can simply be retried
                    Err(e) => show_toast.emit(format!("Could not save times: {}", e)),
                }
            });
        })
    };

    let on_close_panel = {
        let editor_days = editor_days.clone();
        Callback::from(move |_| editor_days.set(None))
    };

    let detail = (*viewing_day).map(|day| {
        assemble_day_detail(
            day,
            today,
            props.role,
            &schedule.state.events,
            &schedule.state.availability,
            &schedule.state.directory,
            &policy,
        )
    });

    let selection_bar = if props.role == Role::Psychologist {
        match &*selection {
            Some(current) => {
                let toggle_label = match current.mode() {
                    SelectionMode::Single => "Select a range",
                    SelectionMode::Interval => "Select one by one",
                };
                let proceed_disabled = current.is_empty();
                html! {
                    <div class="selection-bar">
                        <div class="selection-info">
                            <span class="instruction">{current.instruction()}</span>
                            <button class="btn" onclick={on_toggle_mode}>{toggle_label}</button>
                        </div>
                        <div class="selection-actions">
                            <button class="btn" onclick={on_cancel_selection}>{"Cancel"}</button>
                            <button
                                class="btn btn-primary"
                                disabled={proceed_disabled}
                                onclick={on_proceed}
                            >
                                {"Next"}
                            </button>
                        </div>
                    </div>
                }
            }
            None => html! {
                <div class="selection-bar">
                    <div class="selection-actions">
                        <button class="btn btn-primary" onclick={on_enter_selection}>
                            {"Publish availability"}
                        </button>
                    </div>
                </div>
            },
        }
    } else {
        html! {}
    };

    html! {
        <div class="schedule-page">
            <div class="schedule-main">
                {if schedule.state.loading {
                    html! { <div class="loading">{"Loading schedule..."}</div> }
                } else {
                    html! {}
                }}
                <ContinuousCalendar
                    role={props.role}
                    events={schedule.state.events.clone()}
                    availability={schedule.state.availability.clone()}
                    directory={schedule.state.directory.clone()}
                    selection_active={selection.is_some()}
                    pending={(*selection).clone()}
                    viewing_day={*viewing_day}
                    on_day_click={on_day_click}
                    on_pending_select={on_pending_select}
                />
                {selection_bar}
            </div>

            {if let Some(days) = (*editor_days).clone() {
                html! {
                    <TimeSelectionPanel
                        selected_days={days}
                        availability={schedule.state.availability.clone()}
                        on_close={on_close_panel}
                        on_save={on_save}
                    />
                }
            } else {
                html! {}
            }}

            {if let Some(view) = detail {
                html! {
                    <DayDetailPanel
                        view={view}
                        on_close={on_close_detail}
                        on_edit={on_edit}
                        on_block={on_block}
                    />
                }
            } else {
                html! {}
            }}

            <Toast message={(*toast).clone()} />
        </div>
    }
}
