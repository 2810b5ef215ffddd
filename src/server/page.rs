//! Single-page explorer with an embedded Cytoscape graph.
//!
//! The page keeps no state of its own: every interaction is posted as an
//! action and the returned view model is rendered wholesale.

use crate::ui::derive::{BASE_EDGE_COLOR, BASE_NODE_COLOR};
use crate::ui::Highlight;

/// Render the explorer page
pub fn render_page(title: &str, source: &str) -> String {
    let selected = Highlight::Selected.color();
    let neighbor = Highlight::Neighbor.color();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/cytoscape@3/dist/cytoscape.min.js"></script>
  <style>
    :root {{
      --color-bg: #ffffff;
      --color-surface: #f6f8fa;
      --color-text: #1f2328;
      --color-text-muted: #656d76;
      --color-border: #d0d7de;
      --color-selected: {selected};
      --color-neighbor: {neighbor};
    }}

    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    html, body {{ height: 100%; overflow: hidden; }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, sans-serif;
      background: var(--color-bg);
      color: var(--color-text);
      display: grid;
      grid-template-columns: 260px 1fr 360px;
      grid-template-rows: auto 1fr;
    }}

    header {{
      grid-column: 1 / 4;
      display: flex;
      align-items: center;
      gap: 16px;
      padding: 10px 16px;
      border-bottom: 1px solid var(--color-border);
      background: var(--color-surface);
    }}

    header h1 {{ font-size: 16px; }}
    header .source {{ color: var(--color-text-muted); font-size: 13px; }}
    header .stats {{ margin-left: auto; color: var(--color-text-muted); font-size: 13px; }}

    aside {{
      display: flex;
      flex-direction: column;
      gap: 8px;
      padding: 12px;
      border-right: 1px solid var(--color-border);
      overflow: hidden;
    }}

    #filter, #layout {{
      width: 100%;
      padding: 6px 8px;
      border: 1px solid var(--color-border);
      border-radius: 4px;
      font-size: 13px;
    }}

    #tables {{ list-style: none; overflow-y: auto; flex: 1; }}
    #tables li {{ padding: 4px 8px; cursor: pointer; border-radius: 3px; font-size: 13px; }}
    #tables li:hover {{ background: var(--color-surface); }}
    #tables li.selected {{ background: var(--color-selected); }}
    #tables li.neighbor {{ background: var(--color-neighbor); }}

    #graph {{ width: 100%; height: 100%; }}

    .panels {{
      display: flex;
      flex-direction: column;
      border-left: 1px solid var(--color-border);
      overflow: hidden;
    }}

    .panels h2 {{
      font-size: 12px;
      text-transform: uppercase;
      color: var(--color-text-muted);
      padding: 10px 12px 4px;
    }}

    .panels pre {{
      flex: 1;
      overflow: auto;
      padding: 4px 12px 12px;
      font-size: 12px;
      white-space: pre-wrap;
    }}
  </style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    <span class="source">{source}</span>
    <span class="stats" id="stats"></span>
  </header>
  <aside>
    <input id="filter" type="search" placeholder="Filter tables..." autocomplete="off">
    <ul id="tables"></ul>
    <select id="layout"></select>
  </aside>
  <main><div id="graph"></div></main>
  <section class="panels">
    <h2>Table</h2>
    <pre id="detail"></pre>
    <h2>Related tables</h2>
    <pre id="related"></pre>
  </section>
  <script>
    const cy = cytoscape({{
      container: document.getElementById('graph'),
      style: [
        {{ selector: 'node', style: {{
          'label': 'data(label)',
          'background-color': '{base_node}',
          'font-size': 11,
          'text-valign': 'center'
        }} }},
        {{ selector: 'edge', style: {{
          'width': 1.5,
          'line-color': '{base_edge}',
          'target-arrow-color': '{base_edge}',
          'target-arrow-shape': 'triangle',
          'curve-style': 'bezier'
        }} }},
        {{ selector: 'node.selected', style: {{ 'background-color': '{selected}' }} }},
        {{ selector: 'node.neighbor', style: {{ 'background-color': '{neighbor}' }} }},
        {{ selector: 'edge.neighbor', style: {{
          'line-color': '{neighbor}',
          'target-arrow-color': '{neighbor}'
        }} }}
      ]
    }});

    let currentLayout = null;
    let currentKey = null;
    // Requests are numbered; a reply older than the last one rendered is dropped
    let sentSeq = 0;
    let renderedSeq = 0;

    function renderIfLatest(seq, model) {{
      if (seq < renderedSeq) return;
      renderedSeq = seq;
      render(model);
    }}

    async function dispatch(action) {{
      const seq = ++sentSeq;
      const res = await fetch('/api/actions', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify(action)
      }});
      if (res.ok) renderIfLatest(seq, await res.json());
    }}

    function render(model) {{
      const filter = document.getElementById('filter');
      if (document.activeElement !== filter) filter.value = model.filter;

      const list = document.getElementById('tables');
      list.replaceChildren(...model.list.map(item => {{
        const li = document.createElement('li');
        li.textContent = item.name;
        if (item.highlight) li.className = item.highlight;
        li.addEventListener('click', () => dispatch({{ type: 'list_pick', table: item.name }}));
        return li;
      }}));

      const select = document.getElementById('layout');
      if (select.options.length === 0) {{
        for (const opt of model.layouts) select.add(new Option(opt.label, opt.value));
      }}
      select.value = model.layout;

      const key = model.elements.map(e => e.data.id).join('|');
      const relayout = key !== currentKey || model.layout !== currentLayout;
      cy.batch(() => {{
        if (key !== currentKey) {{
          cy.elements().remove();
          cy.add(model.elements.map(e => ({{ group: e.group, data: e.data }})));
        }}
        cy.elements().classes([]);
        for (const e of model.elements) {{
          if (e.classes) cy.getElementById(e.data.id).classes(e.classes);
        }}
      }});
      if (relayout) cy.layout({{ name: model.layout, animate: false }}).run();
      currentKey = key;
      currentLayout = model.layout;

      if (model.selected) {{
        const node = cy.getElementById(model.selected);
        if (node.nonempty()) cy.animate({{ center: {{ eles: node }}, duration: 200 }});
      }}

      document.getElementById('detail').textContent = model.detail;
      document.getElementById('related').textContent = model.related;
      const s = model.stats;
      document.getElementById('stats').textContent =
        `${{s.visible_tables}} / ${{s.tables}} tables · ${{s.visible_relationships}} / ${{s.relationships}} relationships`;
    }}

    cy.on('tap', 'node', evt => dispatch({{ type: 'graph_tap', table: evt.target.id() }}));
    cy.on('tap', evt => {{
      if (evt.target === cy) dispatch({{ type: 'clear_selection' }});
    }});
    document.addEventListener('keydown', evt => {{
      if (evt.key === 'Escape') dispatch({{ type: 'clear_selection' }});
    }});
    document.getElementById('filter').addEventListener('input', evt =>
      dispatch({{ type: 'set_filter', filter: evt.target.value }}));
    document.getElementById('layout').addEventListener('change', evt =>
      dispatch({{ type: 'set_layout', layout: evt.target.value }}));

    const initialSeq = ++sentSeq;
    fetch('/api/view').then(res => res.json()).then(model => renderIfLatest(initialSeq, model));
  </script>
</body>
</html>
"##,
        title = escape_html(title),
        source = escape_html(source),
        selected = selected,
        neighbor = neighbor,
        base_node = BASE_NODE_COLOR,
        base_edge = BASE_EDGE_COLOR,
    )
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_embeds_widget_and_panels() {
        let page = render_page("Schema Graph", "mysql://app@localhost:3306/shop");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("cytoscape.min.js"));
        assert!(page.contains("id=\"detail\""));
        assert!(page.contains("id=\"related\""));
        assert!(page.contains("'/api/actions'"));
        assert!(page.contains("#F39C12"));
        assert!(page.contains("#F7DC6F"));
    }

    #[test]
    fn test_page_drops_out_of_order_replies() {
        let page = render_page("Schema Graph", "duckdb:shop.duckdb");
        assert!(page.contains("const seq = ++sentSeq;"));
        assert!(page.contains("if (seq < renderedSeq) return;"));
        assert!(page.contains("renderIfLatest(seq, await res.json())"));
        assert!(!page.contains(".then(render)"));
    }

    #[test]
    fn test_page_escapes_title() {
        let page = render_page("<shop>", "a&b");
        assert!(page.contains("<title>&lt;shop&gt;</title>"));
        assert!(page.contains("a&amp;b"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("it's \"x\""), "it&#39;s &quot;x&quot;");
    }
}
