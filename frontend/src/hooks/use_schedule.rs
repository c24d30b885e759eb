use scheduling::{
    AvailabilityMap, EventsByDate, ParticipantDirectory, SchedulePolicy, ScheduleService,
    SlotIndex,
};
use shared::Role;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Everything the schedule views need from the backend, loaded together.
#[derive(Clone, PartialEq)]
pub struct ScheduleState {
    pub events: EventsByDate,
    pub availability: AvailabilityMap,
    pub slot_index: SlotIndex,
    pub directory: ParticipantDirectory,
    pub loading: bool,
}

pub struct UseScheduleResult {
    pub state: ScheduleState,
    pub refresh: Callback<()>,
}

/// Load and cache the three data sets behind the calendar: the subject's
/// appointments, the psychologist's published availability, and the user
/// directory. `refresh` re-fetches all of them, e.g. after a save.
#[hook]
pub fn use_schedule(
    api: &ApiClient,
    role: Role,
    subject_id: &str,
    psychologist_id: &str,
) -> UseScheduleResult {
    let events = use_state(HashMap::new);
    let availability = use_state(AvailabilityMap::new);
    let slot_index = use_state(SlotIndex::default);
    let directory = use_state(ParticipantDirectory::default);
    let loading = use_state(|| true);

    let refresh = {
        let api = api.clone();
        let subject_id = subject_id.to_string();
        let psychologist_id = psychologist_id.to_string();
        let events = events.clone();
        let availability = availability.clone();
        let slot_index = slot_index.clone();
        let directory = directory.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api = api.clone();
            let subject_id = subject_id.clone();
            let psychologist_id = psychologist_id.clone();
            let events = events.clone();
            let availability = availability.clone();
            let slot_index = slot_index.clone();
            let directory = directory.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                let service = ScheduleService::new(api.clone(), SchedulePolicy::default());

                match service.load_appointments(&subject_id, role).await {
                    Ok(grouped) => events.set(grouped),
                    Err(e) => {
                        gloo::console::error!("Failed to load appointments:", e.to_string())
                    }
                }

                match service.load_availability(&psychologist_id).await {
                    Ok((map, index)) => {
                        availability.set(map);
                        slot_index.set(index);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to load availability:", e.to_string())
                    }
                }

                match api.fetch_participants().await {
                    Ok(participants) => {
                        directory.set(ParticipantDirectory::from_participants(participants))
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to load participants:", e.to_string())
                    }
                }

                loading.set(false);
            });
        })
    };

    // Initial load
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = ScheduleState {
        events: (*events).clone(),
        availability: (*availability).clone(),
        slot_index: (*slot_index).clone(),
        directory: (*directory).clone(),
        loading: *loading,
    };

    UseScheduleResult { state, refresh }
}
