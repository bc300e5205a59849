use shared::segment::Segment;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub segment: Option<Segment>,
    #[prop_or_default]
    pub visible: bool,
}

/// Banner summarizing the last settled spin.
#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    if !props.visible {
        return html! {};
    }
    let Some(segment) = &props.segment else {
        return html! {};
    };

    let (message, gradient_classes, animation_class) = if segment.is_losing() {
        (
            format!("{} — better luck next time!", segment.label),
            "from-gray-400 to-gray-600 border-gray-300",
            "animate-pulse",
        )
    } else {
        (
            format!("You won: {}!", segment.label),
            "from-yellow-400 to-orange-500 border-orange-300",
            "animate-bounce",
        )
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class={classes!(
                "flex",
                "items-center",
                "justify-center",
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "text-white",
                "font-bold",
                "text-xl",
                "shadow-lg",
                "border-2",
                "transform",
                "transition-all",
                "duration-500",
                animation_class,
                gradient_classes
            )}>
                <span>{message}</span>
            </div>
        </div>
    }
}
