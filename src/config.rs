use impl_helper::ImplHelper;
use serde_json::Value;

use crate::{
    diagnostic::{Diagnostic, Kind},
    hooks::Hook,
    item::{Item, ITEM_PLACEHOLDER},
    options::{OptionValue, Options},
    types::{Choice, ContainerId, ItemType, Placement, Trigger},
};

#[derive(Debug, Clone, PartialEq, Eq, ImplHelper)]
pub struct Labels {
    #[helper(get)]
    all: String,

    #[helper(get)]
    filtered: String,

    #[helper(get)]
    none: String,

    #[helper(get)]
    links: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            all: "All".into(),
            filtered: "Filtered".into(),
            none: "None".into(),
            links: "Links".into(),
        }
    }
}

/// Resolved checklist configuration. Every field holds a legal value.
#[derive(Debug, Clone, ImplHelper)]
pub struct Config {
    #[helper(get_copy)]
    item_type: ItemType,

    #[helper(get_copy)]
    trigger: Trigger,

    #[helper(get_copy)]
    checked: bool,

    #[helper(get_copy)]
    check_all: bool,

    #[helper(get_copy)]
    placement: Placement,

    #[helper(get)]
    width: String,

    #[helper(get)]
    height: String,

    #[helper(get)]
    labels: Labels,

    #[helper(get)]
    item_html: String,

    #[helper(get)]
    items: Vec<Item>,

    #[helper(get)]
    on_show: Hook,

    #[helper(get)]
    on_hide: Hook,

    #[helper(get)]
    on_change: Hook,

    #[helper(get_copy)]
    debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            item_type: ItemType::default(),
            trigger: Trigger::default(),
            checked: true,
            check_all: false,
            placement: Placement::default(),
            width: String::default(),
            height: String::default(),
            labels: Labels::default(),
            item_html: ITEM_PLACEHOLDER.into(),
            items: Vec::default(),
            on_show: Hook::default(),
            on_hide: Hook::default(),
            on_change: Hook::default(),
            debug: false,
        }
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub config: Config,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Logs the collected diagnostics when `debug` is set or `force` is given.
    pub fn emit(&self, container: &ContainerId, force: bool) {
        for diagnostic in &self.diagnostics {
            diagnostic.emit(container, force || self.config.debug);
        }
    }
}

struct Resolver<'a> {
    options: &'a Options,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    /// The value of `field` if it has the `expected` kind.
    fn json(&mut self, field: &'static str, expected: Kind) -> Option<&'a Value> {
        let options = self.options;
        let value = options.get(field)?;

        match value {
            OptionValue::Json(json) if Kind::of(json) == expected => Some(json),
            _ => {
                self.diagnostics.push(Diagnostic::TypeMismatch {
                    field,
                    actual: value.kind(),
                    expected,
                });
                None
            }
        }
    }

    fn string(&mut self, field: &'static str, default: String) -> String {
        self.json(field, Kind::String)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or(default)
    }

    fn boolean(&mut self, field: &'static str, default: bool) -> bool {
        self.json(field, Kind::Boolean)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    fn choice<T: Choice>(&mut self, field: &'static str, default: T) -> T {
        let Some(name) = self.json(field, Kind::String).and_then(Value::as_str) else {
            return default;
        };

        T::from_name(name).unwrap_or_else(|| {
            self.diagnostics.push(Diagnostic::InvalidValue {
                field,
                value: name.to_owned(),
                allowed: T::ALLOWED,
            });
            default
        })
    }

    fn hook(&mut self, field: &'static str, params_field: &'static str) -> Hook {
        let callback = match self.options.get(field) {
            Some(OptionValue::Callback(callback)) => Some(callback.clone()),
            Some(other) => {
                self.diagnostics.push(Diagnostic::TypeMismatch {
                    field,
                    actual: other.kind(),
                    expected: Kind::Function,
                });
                None
            }
            None => None,
        };

        let params = self
            .json(params_field, Kind::Object)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        Hook::new(callback, params)
    }

    fn items(&mut self, field: &'static str, item_type: ItemType, checked: bool) -> Vec<Item> {
        let Some(specs) = self.json(field, Kind::Array).and_then(Value::as_array) else {
            return Vec::default();
        };

        parse_items(field, specs, item_type, checked, &mut self.diagnostics)
    }
}

/// Parses item specs, skipping (and reporting) the malformed ones.
pub fn parse_items(
    field: &'static str,
    specs: &[Value],
    item_type: ItemType,
    checked: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Item> {
    specs
        .iter()
        .enumerate()
        .filter_map(|(index, spec)| match Item::from_spec(spec, item_type, checked) {
            Ok(item) => Some(item),
            Err(reason) => {
                diagnostics.push(Diagnostic::InvalidItem {
                    field,
                    index,
                    reason,
                });
                None
            }
        })
        .collect()
}

/// Overlays `options` on the defaults. Unknown options are ignored; options of
/// the wrong kind or outside their allowed values fall back to the default.
pub fn resolve(options: &Options) -> Resolution {
    let defaults = Config::default();
    let default_labels = defaults.labels.clone();

    let mut resolver = Resolver {
        options,
        diagnostics: Vec::default(),
    };

    let item_type = resolver.choice("type", defaults.item_type);
    let checked = resolver.boolean("checked", defaults.checked);

    let config = Config {
        item_type,
        trigger: resolver.choice("trigger", defaults.trigger),
        checked,
        check_all: resolver.boolean("checkAll", defaults.check_all),
        placement: resolver.choice("placement", defaults.placement),
        width: resolver.string("width", defaults.width),
        height: resolver.string("height", defaults.height),
        labels: Labels {
            all: resolver.string("labelAll", default_labels.all),
            filtered: resolver.string("labelFiltered", default_labels.filtered),
            none: resolver.string("labelNone", default_labels.none),
            links: resolver.string("labelLinks", default_labels.links),
        },
        item_html: resolver.string("itemHtml", defaults.item_html),
        items: resolver.items("items", item_type, checked),
        on_show: resolver.hook("onShow", "onShowParams"),
        on_hide: resolver.hook("onHide", "onHideParams"),
        on_change: resolver.hook("onChange", "onChangeParams"),
        debug: resolver.boolean("debug", defaults.debug),
    };

    Resolution {
        config,
        diagnostics: resolver.diagnostics,
    }
}
