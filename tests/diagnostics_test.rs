use std::{
    fmt::{Debug, Write},
    sync::{Arc, Mutex},
};

use rand::{rngs::StdRng, SeedableRng};
use rpg_dice_expr::{evaluate_det_with, evaluate_float_with, evaluate_int_with, evaluate_str_with};
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer, Registry,
};

/// Keeps every event as a `name=value` line.
#[derive(Clone, Default)]
struct CapturedEvents(Arc<Mutex<Vec<String>>>);

impl CapturedEvents {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

struct EventFields(String);

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        write!(self.0, "{}={:?} ", field.name(), value).unwrap();
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields(format!("{} ", event.metadata().level()));
        event.record(&mut fields);
        self.0.lock().unwrap().push(fields.0);
    }
}

fn assert_logged_once(events: Vec<String>, notation: &str) {
    assert_eq!(events.len(), 1, "{events:?}");
    let event = &events[0];
    assert!(event.starts_with("DEBUG "), "{event}");
    assert!(event.contains("message=resolved dice notation"), "{event}");
    assert!(event.contains(&format!("notation={notation:?}")), "{event}");
    assert!(event.contains("rolled=RolledNotation"), "{event}");
}

#[test]
fn test_every_entry_point_logs_the_resolved_notation() {
    let events = CapturedEvents::default();
    let subscriber = Registry::default().with(events.clone());
    let notation = "2d6 + 3";

    tracing::subscriber::with_default(subscriber, || {
        let mut rng = StdRng::seed_from_u64(1);

        evaluate_int_with(notation, &mut rng).unwrap();
        assert_logged_once(events.take(), notation);

        evaluate_float_with(notation, &mut rng).unwrap();
        assert_logged_once(events.take(), notation);

        evaluate_str_with(notation, &mut rng).unwrap();
        assert_logged_once(events.take(), notation);

        evaluate_det_with(notation, &mut rng).unwrap();
        assert_logged_once(events.take(), notation);
    });
}

#[test]
fn test_log_includes_dice_rolls_and_surrounding_text() {
    let events = CapturedEvents::default();
    let subscriber = Registry::default().with(events.clone());

    tracing::subscriber::with_default(subscriber, || {
        evaluate_str_with("Hit: 1d20", &mut StdRng::seed_from_u64(1)).unwrap();
    });

    let events = events.take();
    assert_logged_once(events.clone(), "Hit: 1d20");
    assert!(events[0].contains("source: \"Hit: 1d20\""), "{}", events[0]);
    assert!(events[0].contains("rolls: ["), "{}", events[0]);
}
