use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{ChargeSettledEvent, EventHandler, EventProducer, Handler, UnresolvedDebitEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub charge_settled_producer: Vec<EventProducer<ChargeSettledEvent>>,
    pub unresolved_debit_producer: Vec<EventProducer<UnresolvedDebitEvent>>,
}

pub struct EventHandlers {
    pub on_charge_settled: Option<EventHandler<ChargeSettledEvent>>,
    pub on_unresolved_debit: Option<EventHandler<UnresolvedDebitEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_charge_settled = hooks.on_charge_settled.map(|f| EventHandler::new(buffer_size, f));
        let on_unresolved_debit = hooks.on_unresolved_debit.map(|f| EventHandler::new(buffer_size, f));
        Self { on_charge_settled, on_unresolved_debit }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_charge_settled {
            result.charge_settled_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_unresolved_debit {
            result.unresolved_debit_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_charge_settled {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_unresolved_debit {
            tokio::spawn(handler.start_handler());
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_charge_settled: Option<Handler<ChargeSettledEvent>>,
    pub on_unresolved_debit: Option<Handler<UnresolvedDebitEvent>>,
}

impl EventHooks {
    pub fn on_charge_settled<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(ChargeSettledEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_charge_settled = Some(Arc::new(f));
        self
    }

    pub fn on_unresolved_debit<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(UnresolvedDebitEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_unresolved_debit = Some(Arc::new(f));
        self
    }
}
