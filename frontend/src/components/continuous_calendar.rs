use chrono::{Datelike, Local, NaiveDate};
use scheduling::{
    date_key, event_time, month_name, year_grid, AvailabilityMap, DaySelection, DayStateContext,
    EventsByDate, InteractionTarget, ParticipantDirectory, SchedulePolicy,
};
use shared::Role;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContinuousCalendarProps {
    pub role: Role,
    pub events: EventsByDate,
    pub availability: AvailabilityMap,
    pub directory: ParticipantDirectory,
    pub selection_active: bool,
    pub pending: Option<DaySelection>,
    pub viewing_day: Option<NaiveDate>,
    pub on_day_click: Callback<NaiveDate>,
    pub on_pending_select: Callback<NaiveDate>,
}

/// Continuous year calendar: every week of the displayed year in one
/// scrollable grid, with per-day state resolved by the scheduling engine.
#[function_component(ContinuousCalendar)]
pub fn continuous_calendar(props: &ContinuousCalendarProps) -> Html {
    let today = Local::now().date_naive();
    let year = use_state(|| today.year());
    let policy = SchedulePolicy::default();

    let prev_year = {
        let year = year.clone();
        Callback::from(move |_: MouseEvent| year.set(*year - 1))
    };
    let next_year = {
        let year = year.clone();
        Callback::from(move |_: MouseEvent| year.set(*year + 1))
    };

    let context = DayStateContext {
        today,
        role: props.role,
        selection_active: props.selection_active,
        events: &props.events,
        availability: &props.availability,
        pending: props.pending.as_ref(),
        viewing_day: props.viewing_day,
        policy: &policy,
    };

    let weeks = year_grid(*year);
    let rows = weeks.iter().map(|week| {
        let cells = week.iter().map(|day| {
            let state = context.resolve(*day);
            let key = date_key(day.date);

            let mut classes = classes!("calendar-day");
            if !day.in_year {
                classes.push("adjacent-year");
            }
            if state.is_muted {
                classes.push("muted");
            }
            if state.is_available {
                classes.push("available");
            }
            if state.is_pending {
                classes.push("pending");
            }
            if state.is_highlighted {
                classes.push("highlighted");
            }
            if state.is_clickable {
                classes.push("clickable");
            }

            let onclick = {
                let on_day_click = props.on_day_click.clone();
                let on_pending_select = props.on_pending_select.clone();
                let interaction = state.interaction;
                let date = day.date;
                Callback::from(move |_: MouseEvent| match interaction {
                    InteractionTarget::OpenDayDetail => on_day_click.emit(date),
                    InteractionTarget::ToggleSelection => on_pending_select.emit(date),
                    InteractionTarget::None => {}
                })
            };

            let events_for_day = props.events.get(&key);
            let chips = events_for_day.map(|events| {
                events
                    .iter()
                    .map(|appointment| {
                        let time = event_time(&appointment.start)
                            .unwrap_or_else(|| "--:--".to_string());
                        let name = props
                            .directory
                            .display_name(appointment.counterpart_id(props.role));
                        html! {
                            <div class="event-chip" key={appointment.id.clone()}>
                                <span class="event-time">{time}</span>
                                <span class="event-name">{name}</span>
                            </div>
                        }
                    })
                    .collect::<Html>()
            });

            html! {
                <div class={classes} {onclick} key={key.clone()}>
                    <span class={classes!("day-number", state.is_today.then_some("today"))}>
                        {day.date.day()}
                    </span>
                    {if day.date.day() == 1 && day.in_year {
                        html! {
                            <span class="month-label">{month_name(day.date.month())}</span>
                        }
                    } else {
                        html! {}
                    }}
                    <div class="day-events">
                        {chips.unwrap_or_default()}
                    </div>
                </div>
            }
        });

        html! {
            <div class="calendar-week">
                {for cells}
            </div>
        }
    });

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button class="calendar-nav-btn" onclick={prev_year}>{"‹"}</button>
                <h2 class="calendar-title">{*year}</h2>
                <button class="calendar-nav-btn" onclick={next_year}>{"›"}</button>
            </div>
            <div class="calendar-weekdays">
                <div class="weekday">{"Sun"}</div>
                <div class="weekday">{"Mon"}</div>
                <div class="weekday">{"Tue"}</div>
                <div class="weekday">{"Wed"}</div>
                <div class="weekday">{"Thu"}</div>
                <div class="weekday">{"Fri"}</div>
                <div class="weekday">{"Sat"}</div>
            </div>
            <div class="calendar-grid">
                {for rows}
            </div>
        </div>
    }
}
