//! ブラウザ向けの実装の組

use crate::api::{FetchGemini, FetchSheets, GisTokenService};
use docsheet_common::{Controller, Platform, SessionView, Ticker, ViewModel};
use gloo::timers::callback::Interval;
use leptos::prelude::*;
use std::time::Duration;

pub struct Browser;

impl Platform for Browser {
    type Extractor = FetchGemini;
    type Sheets = FetchSheets;
    type Auth = GisTokenService;
    type Ticker = IntervalTicker;
}

pub type AppController = Controller<Browser>;

/// setInterval タイマー（Interval の drop で clearInterval）
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    type Handle = Interval;

    fn start(&self, period: Duration, tick: Box<dyn FnMut()>) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, tick)
    }
}

/// 状態をシグナルに流す
pub struct SignalView(pub WriteSignal<ViewModel>);

impl SessionView for SignalView {
    fn render(&self, model: &ViewModel) {
        self.0.set(model.clone());
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn interval_ticker_ticks_until_dropped() {
        let count = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&count);
        let handle = IntervalTicker.start(
            Duration::from_millis(10),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        TimeoutFuture::new(60).await;
        drop(handle);
        let seen = count.get();
        assert!(seen >= 1, "ticker never fired");

        TimeoutFuture::new(50).await;
        assert_eq!(count.get(), seen);
    }
}
