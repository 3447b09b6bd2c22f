use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;

use crate::explorer::{ExplorerConfig, fuzzy};

/// Text field with fuzzy autocomplete over the graph's node names.
#[component]
pub fn AutocompleteInput(
	value: RwSignal<String>,
	names: Arc<Vec<String>>,
	#[prop(into)] placeholder: String,
	/// Fired on Enter.
	#[prop(optional)]
	on_submit: Option<Rc<dyn Fn()>>,
) -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let open = RwSignal::new(false);

	let suggestions = Memo::new(move |_| {
		value.with(|query| {
			fuzzy::suggest(
				names.iter().map(String::as_str),
				query,
				config.min_query_len,
				config.max_suggestions,
			)
			.into_iter()
			.map(str::to_owned)
			.collect::<Vec<_>>()
		})
	});

	let pick = move |name: String| {
		value.set(name);
		open.set(false);
	};

	view! {
		<div class="autocomplete">
			<input
				type="text"
				placeholder=placeholder
				prop:value=move || value.get()
				on:input=move |ev| {
					value.set(event_target_value(&ev));
					if let Some(shown) = list_visibility(InputEvent::Typed) {
						open.set(shown);
					}
				}
				on:keydown=move |ev| {
					let key = ev.key();
					if let Some(shown) = list_visibility(InputEvent::Key(&key)) {
						open.set(shown);
					}
					if key == "Enter" {
						if let Some(submit) = &on_submit {
							submit();
						}
					}
				}
				// suggestions pick on mousedown, which fires before blur
				on:blur=move |_| {
					if let Some(shown) = list_visibility(InputEvent::Blur) {
						open.set(shown);
					}
				}
			/>
			<Show when=move || open.get() && !suggestions.with(Vec::is_empty)>
				<ul class="suggestions">
					<For
						each=move || suggestions.get()
						key=|name| name.clone()
						children=move |name| {
							let label = name.clone();
							view! {
								<li on:mousedown=move |_| pick(name.clone())>{label}</li>
							}
						}
					/>
				</ul>
			</Show>
		</div>
	}
}

#[derive(Clone, Copy, Debug)]
enum InputEvent<'a> {
	Typed,
	Key(&'a str),
	Blur,
}

/// New visibility of the suggestion list, or `None` to leave it alone.
fn list_visibility(event: InputEvent<'_>) -> Option<bool> {
	match event {
		InputEvent::Typed => Some(true),
		InputEvent::Key("Enter" | "Escape") | InputEvent::Blur => Some(false),
		InputEvent::Key(_) => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn list_closes_when_input_loses_focus() {
		assert_eq!(list_visibility(InputEvent::Typed), Some(true));
		assert_eq!(list_visibility(InputEvent::Blur), Some(false));
	}

	#[test]
	fn only_enter_and_escape_close_from_keyboard() {
		assert_eq!(list_visibility(InputEvent::Key("Enter")), Some(false));
		assert_eq!(list_visibility(InputEvent::Key("Escape")), Some(false));
		assert_eq!(list_visibility(InputEvent::Key("ArrowDown")), None);
	}
}
