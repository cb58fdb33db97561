// In-memory document - Screen markup, CSS matching and selector-chain resolution
//
// A rendered screen is serialized to HTML and parsed with `scraper`, so CSS
// steps get the same selector grammar a browser accepts. Behavior the markup
// cannot carry (form field bindings, click actions) lives in a side table
// keyed by the `data-sim-id` attribute stamped on every rendered element.

use crate::error::{Error, Result};
use crate::locator::{SelectorStep, text_matches};
use scraper::{ElementRef, Html, Selector};
use std::fmt::Write;

const SIM_ID: &str = "data-sim-id";

const VOID_ELEMENTS: &[&str] = &["img", "input"];

/// What a click on an element does to the storefront state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Login,
    AddToCart(&'static str),
    RemoveFromCart(&'static str),
    OpenCart,
    ContinueShopping,
    Checkout,
    ContinueInformation,
    CancelInformation,
    Finish,
    CancelOverview,
    BackHome,
    DismissError,
    OpenMenu,
    CloseMenu,
    AllItems,
    Logout,
    ResetAppState,
}

/// Element description used to build a document.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
    visible: bool,
    field: Option<String>,
    value: String,
    action: Option<Action>,
}

impl Node {
    pub(crate) fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            visible: true,
            field: None,
            value: String::new(),
            action: None,
        }
    }

    pub(crate) fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds one or more space-separated classes
    pub(crate) fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(class);
            }
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
        self
    }

    pub(crate) fn data_test(self, value: &str) -> Self {
        self.attr("data-test", value)
    }

    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub(crate) fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Marks the element as a form control bound to `field` holding `value`.
    pub(crate) fn field(mut self, field: &str, value: &str) -> Self {
        self.field = Some(field.to_string());
        self.value = value.to_string();
        self
    }

    pub(crate) fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Renders the element with the `hidden` attribute.
    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

#[derive(Debug)]
struct Behavior {
    field: Option<String>,
    value: String,
    action: Option<Action>,
}

/// Snapshot of one matched element.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) text: String,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) field: Option<String>,
    /// Field value for bound controls, the `value` attribute otherwise
    pub(crate) value: String,
    /// Nearest click action at or above the element, like event bubbling
    pub(crate) action: Option<Action>,
    /// `value` attributes of child `<option>` elements
    pub(crate) options: Vec<String>,
}

/// Parsed screen plus the behavior table for its elements.
pub(crate) struct Document {
    html: Html,
    behaviors: Vec<Behavior>,
}

impl Document {
    pub(crate) fn new(body: Node) -> Self {
        let mut markup = String::from("<!DOCTYPE html><html><head></head><body>");
        let mut behaviors = Vec::new();
        serialize(body, &mut markup, &mut behaviors);
        markup.push_str("</body></html>");
        Self {
            html: Html::parse_document(&markup),
            behaviors,
        }
    }

    /// Resolves a parsed selector chain to matching elements in document order.
    pub(crate) fn resolve(&self, selector: &str, steps: &[SelectorStep]) -> Result<Vec<Element>> {
        let mut current = vec![self.html.root_element()];
        for step in steps {
            current = match step {
                SelectorStep::Css(css) => {
                    let parsed = Selector::parse(css).map_err(|e| Error::InvalidSelector {
                        selector: selector.to_string(),
                        reason: e.to_string(),
                    })?;
                    query_all(&current, &parsed)
                }
                SelectorStep::HasText(text) => current
                    .into_iter()
                    .filter(|element| text_matches(&text_of(*element), text))
                    .collect(),
                SelectorStep::Nth(index) => SelectorStep::resolve_index(*index, current.len())
                    .map(|i| vec![current[i]])
                    .unwrap_or_default(),
            };
        }
        Ok(current.into_iter().map(|element| self.snapshot(element)).collect())
    }

    fn behavior(&self, element: ElementRef<'_>) -> Option<&Behavior> {
        sim_id(element).and_then(|id| self.behaviors.get(id))
    }

    fn snapshot(&self, element: ElementRef<'_>) -> Element {
        let behavior = self.behavior(element);
        let value = match behavior.and_then(|b| b.field.as_ref().map(|_| b.value.clone())) {
            Some(value) => value,
            None => element.value().attr("value").unwrap_or_default().to_string(),
        };
        let action = element_and_ancestors(element)
            .find_map(|e| self.behavior(e).and_then(|b| b.action.clone()));
        let options = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "option")
            .filter_map(|child| child.value().attr("value").map(str::to_string))
            .collect();

        Element {
            tag: element.value().name().to_string(),
            text: text_of(element),
            visible: element_and_ancestors(element).all(|e| e.value().attr("hidden").is_none()),
            enabled: element.value().attr("disabled").is_none(),
            field: behavior.and_then(|b| b.field.clone()),
            value,
            action,
            options,
        }
    }
}

/// Elements under any of `scopes` matching `selector`, deduplicated, in document order.
fn query_all<'a>(scopes: &[ElementRef<'a>], selector: &Selector) -> Vec<ElementRef<'a>> {
    let mut found: Vec<(usize, ElementRef<'a>)> = Vec::new();
    for scope in scopes {
        for element in scope.select(selector) {
            // `select` visits the scope itself; querySelectorAll does not
            if element == *scope {
                continue;
            }
            // Parser-inserted wrappers (`html`, `body`) are not addressable
            if let Some(id) = sim_id(element) {
                found.push((id, element));
            }
        }
    }
    // Ids are assigned in document order
    found.sort_by_key(|(id, _)| *id);
    found.dedup_by_key(|(id, _)| *id);
    found.into_iter().map(|(_, element)| element).collect()
}

fn sim_id(element: ElementRef<'_>) -> Option<usize> {
    element.value().attr(SIM_ID)?.parse().ok()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn element_and_ancestors(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap))
}

fn serialize(node: Node, out: &mut String, behaviors: &mut Vec<Behavior>) {
    let id = behaviors.len();
    behaviors.push(Behavior {
        field: node.field,
        value: node.value.clone(),
        action: node.action,
    });

    let _ = write!(out, "<{} {}=\"{}\"", node.tag, SIM_ID, id);
    for (name, value) in &node.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value, true));
    }
    if node.tag == "input" && !node.attrs.iter().any(|(name, _)| name == "value") {
        let _ = write!(out, " value=\"{}\"", escape(&node.value, true));
    }
    if !node.visible {
        out.push_str(" hidden");
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&node.tag) {
        return;
    }
    if let Some(text) = &node.text {
        out.push_str(&escape(text, false));
    }
    for child in node.children {
        serialize(child, out, behaviors);
    }
    let _ = write!(out, "</{}>", node.tag);
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    fn sample() -> Document {
        Document::new(
            Node::new("div").id("root").children([
                Node::new("span").class("title").data_test("title").text("Products"),
                Node::new("div").class("inventory_list").children([
                    Node::new("div").class("inventory_item").children([
                        Node::new("div").class("inventory_item_name").text("Sauce Labs Backpack"),
                        Node::new("button").class("btn btn_inventory").text("Add to cart"),
                    ]),
                    Node::new("div").class("inventory_item").children([
                        Node::new("div").class("inventory_item_name").text("Sauce Labs Onesie"),
                        Node::new("button").class("btn btn_inventory").text("Remove"),
                    ]),
                ]),
                Node::new("div").class("menu").hidden().child(
                    Node::new("a").id("logout").text("Logout").on_click(Action::Logout),
                ),
                Node::new("form").children([
                    Node::new("input").id("user-name").field("username", "standard_user"),
                    Node::new("input").id("password").field("password", ""),
                    Node::new("input").id("submit").attr("type", "submit").attr("value", "Login"),
                ]),
            ]),
        )
    }

    fn query(doc: &Document, selector: &str) -> Vec<Element> {
        let locator = Locator::new(selector);
        doc.resolve(selector, &locator.steps().unwrap()).unwrap()
    }

    #[test]
    fn test_simple_selectors() {
        let doc = sample();
        assert_eq!(query(&doc, ".inventory_item").len(), 2);
        assert_eq!(query(&doc, "[data-test=\"title\"]").len(), 1);
        assert_eq!(query(&doc, "[data-test='title']").len(), 1);
        assert_eq!(query(&doc, "[data-test=title]").len(), 1);
        assert_eq!(query(&doc, "span.title").len(), 1);
        assert_eq!(query(&doc, "div.title").len(), 0);
        assert_eq!(query(&doc, "#logout").len(), 1);
        assert_eq!(query(&doc, ".btn.btn_inventory").len(), 2);
        assert_eq!(query(&doc, "[data-test]").len(), 1);
    }

    #[test]
    fn test_combinators() {
        let doc = sample();
        assert_eq!(query(&doc, ".inventory_list .inventory_item_name").len(), 2);
        assert_eq!(query(&doc, ".inventory_list > .inventory_item_name").len(), 0);
        assert_eq!(query(&doc, ".inventory_list > .inventory_item > button").len(), 2);
        assert_eq!(query(&doc, ".title, #logout").len(), 2);
    }

    #[test]
    fn test_full_css_grammar() {
        let doc = sample();
        assert_eq!(query(&doc, "input:not([type=submit])").len(), 2);
        assert_eq!(query(&doc, "#user-name + #password").len(), 1);
        assert_eq!(query(&doc, "#user-name ~ input").len(), 2);
        assert_eq!(query(&doc, "input[id^=user]").len(), 1);
        assert_eq!(query(&doc, "form > input:first-child")[0].field.as_deref(), Some("username"));
        assert_eq!(query(&doc, ".inventory_item:last-child button")[0].text, "Remove");
        assert_eq!(query(&doc, "[class~=btn_inventory]").len(), 2);
    }

    #[test]
    fn test_chain_steps() {
        let doc = sample();
        let onesie = query(&doc, ".inventory_item >> has-text=\"onesie\" >> button");
        assert_eq!(onesie.len(), 1);
        assert_eq!(onesie[0].text, "Remove");

        let last = query(&doc, ".inventory_item_name >> nth=-1");
        assert_eq!(last[0].text, "Sauce Labs Onesie");
        assert!(query(&doc, ".inventory_item_name >> nth=5").is_empty());
        // Substring filters match every item sharing the text
        assert_eq!(query(&doc, ".inventory_item >> has-text=\"Sauce Labs\"").len(), 2);
        // Nested scopes never report the same element twice
        assert_eq!(query(&doc, "div >> .inventory_item_name").len(), 2);
    }

    #[test]
    fn test_element_snapshot() {
        let doc = sample();
        let logout = &query(&doc, "#logout")[0];
        assert!(!logout.visible);
        assert_eq!(logout.action, Some(Action::Logout));
        assert!(query(&doc, ".title")[0].visible);

        let user = &query(&doc, "#user-name")[0];
        assert_eq!(user.tag, "input");
        assert_eq!(user.value, "standard_user");
        assert!(user.enabled);
        assert_eq!(query(&doc, "#submit")[0].value, "Login");
        assert_eq!(query(&doc, "input[value=standard_user]").len(), 1);
    }

    #[test]
    fn test_markup_is_escaped() {
        let doc = Document::new(
            Node::new("div").child(Node::new("span").attr("title", "a \"b\" & c").text("<x> & y")),
        );
        let span = &query(&doc, "span[title='a \"b\" & c']")[0];
        assert_eq!(span.text, "<x> & y");
    }

    #[test]
    fn test_invalid_css_is_reported() {
        let doc = sample();
        for bad in ["div[", ".", "> div", "div >", "#", "[]"] {
            let steps = vec![SelectorStep::Css(bad.to_string())];
            assert!(
                matches!(doc.resolve(bad, &steps), Err(Error::InvalidSelector { .. })),
                "{} should be rejected",
                bad
            );
        }
    }
}
