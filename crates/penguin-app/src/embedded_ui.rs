//! Embedded HTML form served to the browser.
//!
//! The page is static; it renders its controls from the `Initialize`
//! message and talks to the backend over the WebSocket on `ws_port`.
//! Backend strings reach the DOM through `textContent` only.

/// Get HTML content for the form page.
pub fn get_html(ws_port: u16) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Penguin Species Predictor</title>
    <script>window.__PENGUIN_WS_PORT__ = {ws_port};</script>
    <style>
        html, body {{ margin: 0; padding: 0; background: #f5f7fa; color: #1f2933;
                      font-family: system-ui, -apple-system, sans-serif; }}
        main {{ max-width: 640px; margin: 0 auto; padding: 24px; }}
        h1 {{ font-weight: 400; }}
        .control {{ margin: 16px 0; }}
        .control label {{ display: flex; justify-content: space-between; font-weight: 600; }}
        .control small {{ color: #7b8794; }}
        input[type=range], select {{ width: 100%; }}
        button {{ padding: 8px 16px; font-size: 15px; }}
        #result {{ margin-top: 24px; padding: 16px; border-radius: 6px; display: none; }}
        #result.ok {{ display: block; background: #e3f9e5; }}
        #result.err {{ display: block; background: #ffe3e3; }}
        #status {{ font-size: 13px; color: #7b8794; }}
        pre {{ white-space: pre-wrap; }}
        #notice {{ display: none; padding: 8px 12px; border-radius: 6px; background: #e3f9e5; }}
        #notice.shown {{ display: block; }}
        #about {{ margin-top: 32px; font-size: 14px; }}
        #about dt {{ font-weight: 600; }}
        #about dd {{ margin: 0 0 8px 0; }}
    </style>
</head>
<body>
<main>
    <h1>Penguin Species Predictor</h1>
    <p>Predicts the species of a penguin from its body measurements.</p>
    <p id="status">Connecting…</p>
    <p id="notice">Model and preprocessing objects loaded successfully.</p>
    <form id="form"></form>
    <div id="result"></div>
    <section id="about">
        <h2>About the penguin dataset</h2>
        <p>The measurements come from three penguin species observed on islands
           of the Palmer Archipelago in Antarctica:</p>
        <ul>
            <li><strong>Adelie</strong></li>
            <li><strong>Chinstrap</strong></li>
            <li><strong>Gentoo</strong></li>
        </ul>
        <dl>
            <dt>Culmen length</dt>
            <dd>Length of the upper ridge of the bill, in millimetres.</dd>
            <dt>Culmen depth</dt>
            <dd>Depth of the bill from top to bottom, in millimetres.</dd>
            <dt>Flipper length</dt>
            <dd>Length of the flipper, in millimetres.</dd>
            <dt>Body mass</dt>
            <dd>Weight of the penguin, in grams.</dd>
            <dt>Sex</dt>
            <dd>Sex of the penguin as recorded in the dataset.</dd>
        </dl>
    </section>
</main>
<script>
(() => {{
    const port = window.__PENGUIN_WS_PORT__;
    const ws = new WebSocket(`ws://${{location.hostname}}:${{port}}`);
    const form = document.getElementById("form");
    const result = document.getElementById("result");
    const status = document.getElementById("status");
    const notice = document.getElementById("notice");
    let schema = null;

    const send = (type, data) => ws.send(JSON.stringify(data === undefined ? {{ type }} : {{ type, data }}));

    function el(tag, text) {{
        const node = document.createElement(tag);
        if (text !== undefined) node.textContent = text;
        return node;
    }}

    function decimals(step) {{
        const s = String(step);
        return s.includes(".") ? s.split(".")[1].length : 0;
    }}

    function render() {{
        form.innerHTML = "";
        for (const c of schema.numeric) {{
            const row = document.createElement("div");
            row.className = "control";
            row.innerHTML = `
                <label for="${{c.field}}">${{c.label}} (${{c.unit}})
                    <span id="${{c.field}}-value">${{c.default.toFixed(decimals(c.step))}}</span></label>
                <input type="range" id="${{c.field}}" min="${{c.min}}" max="${{c.max}}"
                       step="${{c.step}}" value="${{c.default}}">
                <small>${{c.help}}</small>`;
            form.appendChild(row);
            const input = row.querySelector("input");
            input.addEventListener("input", () => {{
                document.getElementById(`${{c.field}}-value`).textContent =
                    Number(input.value).toFixed(decimals(c.step));
            }});
        }}
        const sex = el("div");
        sex.className = "control";
        const sexLabel = el("label", schema.sex.label);
        sexLabel.htmlFor = "sex";
        const select = el("select");
        select.id = "sex";
        for (const o of schema.sex.options) {{
            const option = el("option", o);
            option.selected = o === schema.sex.default;
            select.appendChild(option);
        }}
        sex.append(sexLabel, select, el("small", schema.sex.help));
        form.appendChild(sex);
        const button = document.createElement("button");
        button.type = "submit";
        button.textContent = schema.trigger_label;
        form.appendChild(button);
    }}

    function currentInput() {{
        const input = {{ sex: document.getElementById("sex").value }};
        for (const c of schema.numeric) {{
            input[c.field] = Number(document.getElementById(c.field).value);
        }}
        return input;
    }}

    function show(kind, ...nodes) {{
        result.className = kind;
        result.replaceChildren(...nodes);
    }}

    form.addEventListener("submit", (e) => {{
        e.preventDefault();
        if (schema) send("Predict", {{ input: currentInput() }});
    }});

    ws.addEventListener("open", () => {{
        status.textContent = "Connected";
        send("RequestState");
    }});
    ws.addEventListener("close", () => {{ status.textContent = "Disconnected"; }});
    ws.addEventListener("message", (event) => {{
        const msg = JSON.parse(event.data);
        switch (msg.type) {{
            case "Initialize":
                schema = msg.data.schema;
                render();
                notice.className = "shown";
                break;
            case "PredictionReady": {{
                const r = msg.data.report;
                const confidence = el("p", "Confidence: ");
                confidence.appendChild(el("strong", `${{r.confidence_percent.toFixed(2)}}%`));
                show("ok", el("h2", r.species), confidence, el("pre", msg.data.text));
                break;
            }}
            case "Rejected":
            case "Error":
                show("err", el("p", msg.data.message));
                break;
            case "StateReset":
                result.className = "";
                break;
        }}
    }});
}})();
</script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_is_injected() {
        let html = get_html(9555);
        assert!(html.contains("window.__PENGUIN_WS_PORT__ = 9555;"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_backend_text_is_not_parsed_as_markup() {
        let html = get_html(9555);
        assert!(html.contains("result.replaceChildren(...nodes)"));
        assert!(html.contains("el(\"p\", msg.data.message)"));
        assert!(html.contains("el(\"h2\", r.species)"));
        assert!(!html.contains("result.innerHTML"));
    }

    #[test]
    fn test_about_section_and_load_notice() {
        let html = get_html(9555);
        assert!(html.contains("About the penguin dataset"));
        for species in ["Adelie", "Chinstrap", "Gentoo"] {
            assert!(html.contains(species), "missing {species}");
        }
        assert!(html.contains("Palmer Archipelago in Antarctica"));
        for feature in ["Culmen length", "Culmen depth", "Flipper length", "Body mass", "Sex"] {
            assert!(html.contains(&format!("<dt>{feature}</dt>")), "missing {feature}");
        }
        assert!(html.contains("loaded successfully"));
    }
}
