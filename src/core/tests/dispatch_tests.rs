// Tests for PubSub fault handling and reentrant dispatch
#[cfg(test)]
mod tests {
    use crate::core::{
        bus::{
            BusConfig, Diagnostic, DispatchError, DispatchPolicy, PubSub, RecordingDiagnostics,
            Subscriber, SubscriberError, SubscriberRef,
        },
        event::{Event, EventKind},
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Logs entry and exit, optionally publishing a derived event in between
    struct Tracer {
        label: &'static str,
        trace: Trace,
        emit: Option<fn(&Event) -> Event>,
    }

    impl Subscriber for Tracer {
        fn name(&self) -> &str {
            self.label
        }

        fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
            self.trace.borrow_mut().push(format!("{} enter", self.label));
            if let Some(emit) = self.emit {
                bus.publish(emit(event))?;
            }
            self.trace.borrow_mut().push(format!("{} exit", self.label));
            Ok(())
        }
    }

    struct Faulty;

    impl Subscriber for Faulty {
        fn name(&self) -> &str {
            "faulty"
        }

        fn handle(&self, _event: &Event, _bus: &PubSub) -> Result<(), SubscriberError> {
            Err(SubscriberError::fault("boom"))
        }
    }

    fn warning_for(event: &Event) -> Event {
        Event::low_stock_warning(event.machine_id())
    }

    fn tracer(label: &'static str, trace: &Trace) -> SubscriberRef {
        Rc::new(Tracer {
            label,
            trace: Rc::clone(trace),
            emit: None,
        })
    }

    #[test]
    fn test_nested_publish_completes_before_outer_resumes() {
        let bus = PubSub::new();
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(
            EventKind::Sale,
            Rc::new(Tracer {
                label: "sale",
                trace: trace.clone(),
                emit: Some(warning_for),
            }),
        );
        bus.subscribe(EventKind::Sale, tracer("sale-after", &trace));
        bus.subscribe(EventKind::LowStockWarning, tracer("warning-a", &trace));
        bus.subscribe(EventKind::LowStockWarning, tracer("warning-b", &trace));

        bus.publish(Event::sale("001", 1).unwrap()).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec![
                "sale enter",
                "warning-a enter",
                "warning-a exit",
                "warning-b enter",
                "warning-b exit",
                "sale exit",
                "sale-after enter",
                "sale-after exit",
            ]
        );
    }

    #[test]
    fn test_fail_fast_aborts_remaining_subscribers() {
        let bus = PubSub::new();
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(EventKind::Refill, tracer("before", &trace));
        bus.subscribe(EventKind::Refill, Rc::new(Faulty));
        bus.subscribe(EventKind::Refill, tracer("after", &trace));

        let err = bus.publish(Event::refill("001", 3).unwrap()).unwrap_err();

        match &err {
            DispatchError::Handler {
                kind, subscriber, ..
            } => {
                assert_eq!(*kind, EventKind::Refill);
                assert_eq!(subscriber, "faulty");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*trace.borrow(), vec!["before enter", "before exit"]);
    }

    #[test]
    fn test_fail_fast_propagates_through_nested_publish() {
        let bus = PubSub::new();
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(
            EventKind::Sale,
            Rc::new(Tracer {
                label: "sale",
                trace: trace.clone(),
                emit: Some(warning_for),
            }),
        );
        bus.subscribe(EventKind::LowStockWarning, Rc::new(Faulty));

        let err = bus.publish(Event::sale("001", 1).unwrap()).unwrap_err();

        // Outer handler never reached its exit
        assert_eq!(*trace.borrow(), vec!["sale enter"]);
        match err.root_cause() {
            DispatchError::Handler {
                kind, subscriber, ..
            } => {
                assert_eq!(*kind, EventKind::LowStockWarning);
                assert_eq!(subscriber, "faulty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_isolate_reports_fault_and_continues() {
        let diagnostics = Rc::new(RecordingDiagnostics::new());
        let bus = PubSub::with_config(
            BusConfig::new().with_dispatch_policy(DispatchPolicy::Isolate),
        )
        .with_diagnostics(diagnostics.clone());
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(EventKind::Refill, Rc::new(Faulty));
        bus.subscribe(EventKind::Refill, tracer("after", &trace));
        diagnostics.clear();

        assert!(bus.publish(Event::refill("001", 3).unwrap()).is_ok());

        assert_eq!(*trace.borrow(), vec!["after enter", "after exit"]);
        assert_eq!(
            diagnostics.entries(),
            vec![Diagnostic::HandlerFault {
                kind: EventKind::Refill,
                subscriber: "faulty".to_string(),
                error: "handler fault: boom".to_string(),
            }]
        );
    }

    /// Subscribes a fresh tracer for the same kind while handling
    struct Recruiter {
        trace: Trace,
    }

    impl Subscriber for Recruiter {
        fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
            bus.subscribe(event.kind(), tracer("recruit", &self.trace));
            Ok(())
        }
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_to_next_publish() {
        let bus = PubSub::new();
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(
            EventKind::Sale,
            Rc::new(Recruiter {
                trace: trace.clone(),
            }),
        );

        bus.publish(Event::sale("001", 1).unwrap()).unwrap();
        assert!(trace.borrow().is_empty());
        assert_eq!(bus.subscriber_count(EventKind::Sale), 2);

        bus.publish(Event::sale("001", 1).unwrap()).unwrap();
        assert_eq!(*trace.borrow(), vec!["recruit enter", "recruit exit"]);
    }

    #[test]
    fn test_subscribe_and_unsubscribe_emit_diagnostics() {
        let diagnostics = Rc::new(RecordingDiagnostics::new());
        let bus = PubSub::new().with_diagnostics(diagnostics.clone());
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let handler = tracer("watcher", &trace);

        bus.subscribe(EventKind::StockLevelOk, handler.clone());
        bus.unsubscribe(EventKind::StockLevelOk, &handler);
        bus.unsubscribe(EventKind::StockLevelOk, &handler);

        assert_eq!(
            diagnostics.entries(),
            vec![
                Diagnostic::SubscriberAdded {
                    kind: EventKind::StockLevelOk,
                    subscriber: "watcher".to_string(),
                },
                Diagnostic::SubscriberRemoved {
                    kind: EventKind::StockLevelOk,
                    subscriber: "watcher".to_string(),
                },
            ]
        );
    }
}
