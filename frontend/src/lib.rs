pub mod components;
pub mod styles;

use yew::prelude::*;

use components::{FortuneWheel, ResultDisplay};
use shared::outcome::SpinMode;
use shared::segment::Segment;
use shared::theme::ThemeSpec;

fn demo_segments() -> Vec<Segment> {
    let entries = [
        ("grand", "Grand Prize", "#f97316", 10.0),
        ("fifty", "50 Credits", "#06b6d4", 25.0),
        ("again", "Dommage", "#6b7280", 25.0),
        ("twenty", "20 Credits", "#8b5cf6", 25.0),
        ("retry", "Try Again", "#374151", 25.0),
        ("ten", "10 Credits", "#ec4899", 25.0),
    ];
    entries
        .iter()
        .map(|(id, label, color, probability)| {
            let mut segment = Segment::new(*id, *label);
            segment.color = Some((*color).to_string());
            segment.probability = *probability;
            segment
        })
        .collect()
}

#[function_component(App)]
pub fn app() -> Html {
    let last_result = use_state(|| None::<Segment>);
    let show_result = use_state(|| false);

    let on_spin = {
        let show_result = show_result.clone();
        Callback::from(move |_| show_result.set(false))
    };
    let on_result = {
        let last_result = last_result.clone();
        let show_result = show_result.clone();
        Callback::from(move |segment: Segment| {
            last_result.set(Some(segment));
            show_result.set(true);
        })
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class="py-10">
                <h1 class={classes!(styles::TEXT_H1, "mb-8")}>
                    <span class={styles::TEXT_ACCENT}>{"Fortuna Wheel"}</span>
                </h1>
                <div class={styles::CARD}>
                    <div class="flex justify-center">
                        <FortuneWheel
                            segments={demo_segments()}
                            theme={ThemeSpec::Name("classic".to_string())}
                            size={420}
                            spin_mode={SpinMode::Probability}
                            win_probability={60.0}
                            border_style={Some("gold".to_string())}
                            on_spin={on_spin}
                            on_result={on_result}
                        />
                    </div>
                    <ResultDisplay segment={(*last_result).clone()} visible={*show_result} />
                    <p class={classes!(styles::TEXT_BODY, "mt-6", "text-center", "text-sm")}>
                        {"Click the wheel or the button to spin."}
                    </p>
                </div>
            </div>
        </div>
    }
}
