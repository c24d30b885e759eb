use chrono::NaiveDate;
use scheduling::DayDetailView;
use shared::AppointmentStatus;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DayDetailPanelProps {
    pub view: DayDetailView,
    pub on_close: Callback<()>,
    pub on_edit: Callback<()>,
    pub on_block: Callback<NaiveDate>,
}

fn status_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Confirmed => "status-chip confirmed",
        AppointmentStatus::PendingApproval => "status-chip pending",
        AppointmentStatus::Cancelled => "status-chip cancelled",
        AppointmentStatus::Completed => "status-chip completed",
    }
}

/// Sidebar with one day's appointments and published times, plus the
/// edit/block actions when the day still lies ahead.
#[function_component(DayDetailPanel)]
pub fn day_detail_panel(props: &DayDetailPanelProps) -> Html {
    let view = &props.view;

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_edit_click = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(()))
    };
    let on_block_click = {
        let on_block = props.on_block.clone();
        let date = view.date;
        Callback::from(move |_: MouseEvent| on_block.emit(date))
    };

    let events = if view.events.is_empty() {
        html! {
            <p class="empty-note">{"No appointments scheduled for this day."}</p>
        }
    } else {
        html! {
            <ul class="event-list">
                {for view.events.iter().map(|event| html! {
                    <li class="event-row" key={event.id.clone()}>
                        <div class="event-row-header">
                            <span class="event-time">{&event.time}</span>
                            <span class={status_class(event.status)}>{event.status_label}</span>
                        </div>
                        <p class="event-title">{&event.title}</p>
                    </li>
                })}
            </ul>
        }
    };

    let times = if view.times.is_empty() {
        html! {
            <p class="empty-note">{"No available times for this day."}</p>
        }
    } else {
        html! {
            <div class="time-chips">
                {for view.times.iter().map(|time| html! {
                    <span class="time-chip" key={time.clone()}>{time}</span>
                })}
            </div>
        }
    };

    html! {
        <div class="day-detail-panel">
            <div class="panel-header">
                <h2>{"Day details"}</h2>
                <button class="close-btn" onclick={on_close_click}>{"×"}</button>
            </div>

            <p class="panel-date">{&view.heading}</p>

            <div class="panel-body">
                <h3>{"Scheduled appointments"}</h3>
                {events}

                <h3>{"Available times"}</h3>
                {times}
            </div>

            {if view.can_edit || view.can_block {
                html! {
                    <div class="panel-footer">
                        {if view.can_edit {
                            html! {
                                <button class="btn btn-primary" onclick={on_edit_click}>
                                    {"Edit times"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                        {if view.can_block {
                            html! {
                                <button class="btn btn-danger" onclick={on_block_click}>
                                    {"Block day"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
