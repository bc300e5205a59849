mod draw;
mod image_cache;
mod result_display;
mod spin_button;

pub use result_display::ResultDisplay;
pub use spin_button::SpinButton;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, CustomEvent, CustomEventInit, HtmlCanvasElement};
use yew::prelude::*;

use shared::border_styles::{get_style, BorderStyleConfig, DEFAULT_BORDER_STYLE};
use shared::constants::SETTLE_FALLBACK_GRACE_MS;
use shared::outcome::SpinMode;
use shared::pointer_physics::PointerPhysics;
use shared::segment::{normalize_segments, Segment};
use shared::spin_animator::{Frame, SpinAnimator, SpinRequest, SpinSpeed};
use shared::theme::{get_theme, BrandColors, Theme, ThemeSpec};

use draw::RenderFrame;
use image_cache::ImageCache;

/// DOM event dispatched on settle so embed pages can react (confetti and
/// the like) without holding a Rust callback.
pub const WHEEL_RESULT_EVENT: &str = "wheelResult";

#[derive(Properties, PartialEq)]
pub struct FortuneWheelProps {
    pub segments: Vec<Segment>,
    #[prop_or_default]
    pub theme: Option<ThemeSpec>,
    /// Canvas edge length in pixels.
    #[prop_or(380)]
    pub size: u32,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub disable_pointer_animation: bool,
    #[prop_or_default]
    pub spin_mode: SpinMode,
    #[prop_or(50.0)]
    pub win_probability: f64,
    #[prop_or_default]
    pub speed: Option<SpinSpeed>,
    #[prop_or_default]
    pub border_style: Option<String>,
    #[prop_or_default]
    pub border_color: Option<String>,
    #[prop_or_default]
    pub border_width: Option<f64>,
    #[prop_or(true)]
    pub show_bulbs: bool,
    #[prop_or_default]
    pub brand_colors: Option<BrandColors>,
    #[prop_or(true)]
    pub show_button: bool,
    /// Fired synchronously when a spin request is accepted.
    #[prop_or_default]
    pub on_spin: Callback<()>,
    /// Fired exactly once per completed spin, after the wheel has
    /// visually settled.
    #[prop_or_default]
    pub on_result: Callback<Segment>,
}

/// Per-render snapshot of everything the frame loop reads.
#[derive(Clone, PartialEq)]
struct ViewConfig {
    segments: Vec<Segment>,
    theme: Theme,
    style: &'static BorderStyleConfig,
    border_color: Option<String>,
    border_width: Option<f64>,
    size: f64,
    show_bulbs: bool,
    disabled: bool,
    pointer_enabled: bool,
    mode: SpinMode,
    win_probability: f64,
    duration_ms: f64,
}

impl ViewConfig {
    fn from_props(props: &FortuneWheelProps) -> Self {
        let theme_spec = props.theme.clone().unwrap_or_default();
        let theme = get_theme(&theme_spec, props.brand_colors.as_ref());
        let style = get_style(props.border_style.as_deref().unwrap_or(DEFAULT_BORDER_STYLE));
        let duration_ms = props
            .speed
            .map(SpinSpeed::duration_ms)
            .unwrap_or(theme.animation.duration_ms);
        Self {
            segments: normalize_segments(props.segments.clone()),
            theme,
            style,
            border_color: props.border_color.clone(),
            border_width: props.border_width,
            size: props.size as f64,
            show_bulbs: props.show_bulbs,
            disabled: props.disabled,
            pointer_enabled: !props.disable_pointer_animation,
            mode: props.spin_mode,
            win_probability: props.win_probability.clamp(0.0, 100.0),
            duration_ms,
        }
    }
}

/// Everything the frame loop and the click handler share. One cell per
/// wheel instance; nothing is process-global.
struct WheelShared {
    animator: SpinAnimator,
    pointer: PointerPhysics,
    cache: ImageCache,
    view: ViewConfig,
    on_result: Callback<Segment>,
    last_frame_ms: Option<f64>,
}

#[function_component(FortuneWheel)]
pub fn fortune_wheel(props: &FortuneWheelProps) -> Html {
    let canvas_ref = use_node_ref();
    let spinning = use_state(|| false);
    let shared = {
        let view = ViewConfig::from_props(props);
        let on_result = props.on_result.clone();
        use_mut_ref(move || WheelShared {
            animator: SpinAnimator::new(),
            pointer: PointerPhysics::new(),
            cache: ImageCache::new(),
            view,
            on_result,
            last_frame_ms: None,
        })
    };
    let fallback_timer = use_mut_ref(|| None::<Timeout>);

    // Keep the shared cell in sync with the latest props.
    {
        let shared = shared.clone();
        let view = ViewConfig::from_props(props);
        let on_result = props.on_result.clone();
        use_effect(move || {
            let mut cell = shared.borrow_mut();
            cell.animator.set_disabled(view.disabled);
            cell.animator.set_easing(view.theme.animation.easing);
            cell.view = view;
            cell.on_result = on_result;
            || ()
        });
    }

    let trigger_spin = {
        let shared = shared.clone();
        let fallback_timer = fallback_timer.clone();
        let spinning = spinning.clone();
        let on_spin = props.on_spin.clone();
        Callback::from(move |_: MouseEvent| {
            let started = {
                let mut cell = shared.borrow_mut();
                let now = js_sys::Date::now();
                let WheelShared {
                    ref mut animator,
                    ref view,
                    ..
                } = *cell;
                let request = SpinRequest {
                    segments: &view.segments,
                    mode: view.mode,
                    win_probability: view.win_probability,
                    duration_ms: view.duration_ms,
                    now_ms: now,
                };
                animator.spin(&request, &mut rand::thread_rng())
            };
            let Some(start) = started else {
                return;
            };
            spinning.set(true);
            on_spin.emit(());

            // Safety net: if the frame loop is preempted, settle shortly
            // after the nominal duration.
            let timer = {
                let shared = shared.clone();
                let spinning = spinning.clone();
                let run_id = start.run_id;
                let delay = start.duration_ms as u32 + SETTLE_FALLBACK_GRACE_MS;
                Timeout::new(delay, move || {
                    let settled = {
                        let mut cell = shared.borrow_mut();
                        cell.animator.force_settle(run_id)
                    };
                    if let Some(segment) = settled {
                        spinning.set(false);
                        let on_result = shared.borrow().on_result.clone();
                        finish_spin(&on_result, &segment);
                    }
                })
            };
            *fallback_timer.borrow_mut() = Some(timer);
        })
    };

    // One frame loop per instance drives easing, pointer physics and the
    // redraw; it also keeps time-based border styles animating at rest.
    {
        let canvas_ref = canvas_ref.clone();
        let shared = shared.clone();
        let fallback_timer = fallback_timer.clone();
        let spinning = spinning.clone();
        use_effect_with((), move |_| {
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let frame_fn: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            let frame_fn_seed = frame_fn.clone();
            let raf_id_in_frame = raf_id.clone();

            *frame_fn_seed.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let now = js_sys::Date::now();
                let settled = {
                    let mut cell = shared.borrow_mut();
                    let dt_s = cell
                        .last_frame_ms
                        .map(|last| ((now - last) / 1000.0).max(0.0))
                        .unwrap_or(1.0 / 60.0);
                    cell.last_frame_ms = Some(now);

                    let run_id = cell.animator.current_run_id();
                    let outcome = cell.animator.advance(run_id, now);

                    let WheelShared {
                        ref animator,
                        ref mut pointer,
                        ref mut cache,
                        ref view,
                        ..
                    } = *cell;
                    let rotation = animator.state().rotation;
                    let pointer_angle =
                        pointer.step(rotation, animator.is_spinning(), view.pointer_enabled, dt_s);

                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        let context = canvas
                            .get_context("2d")
                            .unwrap()
                            .unwrap()
                            .dyn_into::<CanvasRenderingContext2d>()
                            .unwrap();
                        let frame = RenderFrame {
                            segments: &view.segments,
                            theme: &view.theme,
                            style: view.style,
                            border_color: view.border_color.as_deref(),
                            border_width: view.border_width,
                            rotation,
                            pointer_angle,
                            is_spinning: animator.is_spinning(),
                            show_bulbs: view.show_bulbs,
                            size: view.size,
                            now_ms: now,
                        };
                        draw::draw_wheel(&context, cache, &frame);
                    }

                    match outcome {
                        Frame::Settled(segment) => Some(segment),
                        _ => None,
                    }
                };

                if let Some(segment) = settled {
                    // The frame path won the race; the fallback timer is
                    // cancelled by dropping it.
                    fallback_timer.borrow_mut().take();
                    spinning.set(false);
                    let on_result = shared.borrow().on_result.clone();
                    finish_spin(&on_result, &segment);
                }

                if let Some(window) = web_sys::window() {
                    if let Ok(id) = window.request_animation_frame(
                        frame_fn.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    ) {
                        raf_id_in_frame.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(window) = web_sys::window() {
                if let Ok(id) = window.request_animation_frame(
                    frame_fn_seed.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                ) {
                    raf_id.set(Some(id));
                }
            }

            move || {
                if let (Some(window), Some(id)) = (web_sys::window(), raf_id.get()) {
                    let _ = window.cancel_animation_frame(id);
                }
                frame_fn_seed.borrow_mut().take();
            }
        });
    }

    let size = props.size.to_string();
    html! {
        <div class="relative inline-flex flex-col items-center">
            <canvas
                ref={canvas_ref}
                width={size.clone()}
                height={size}
                class={crate::styles::WHEEL_CANVAS}
                onclick={trigger_spin.clone()}
                style={if *spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
            if props.show_button {
                <div class="mt-6 w-full max-w-[260px]">
                    <SpinButton
                        is_spinning={*spinning}
                        disabled={props.disabled || props.segments.is_empty()}
                        onclick={trigger_spin}
                    />
                </div>
            }
        </div>
    }
}

fn finish_spin(on_result: &Callback<Segment>, segment: &Segment) {
    log::debug!("wheel settled on segment '{}'", segment.id);
    dispatch_result_event(segment);
    on_result.emit(segment.clone());
}

fn dispatch_result_event(segment: &Segment) {
    if let Some(window) = web_sys::window() {
        let event_init = CustomEventInit::new();
        if let Ok(detail) = serde_json::to_string(segment) {
            event_init.set_detail(&JsValue::from_str(&detail));
        }
        if let Ok(event) = CustomEvent::new_with_event_init_dict(WHEEL_RESULT_EVENT, &event_init) {
            let _ = window.dispatch_event(&event);
        }
    }
}
