use crate::models::{BudgetLayout, RecalculateResponse};
use crate::summary::format_percentage;
use std::fmt::Write as _;

pub fn render_index(layout: &BudgetLayout, defaults: &RecalculateResponse) -> String {
    INDEX_HTML
        .replace("{{TOTAL}}", &layout.total_capacity.to_string())
        .replace("{{REMAINING}}", &defaults.accounting.remaining_hours.to_string())
        .replace("{{SLIDER}}", &render_slider(layout, defaults))
        .replace("{{ROWS}}", &render_rows(defaults))
        .replace("{{INITIAL_STATE}}", &initial_state(defaults))
}

fn render_rows(defaults: &RecalculateResponse) -> String {
    let mut rows = String::new();
    for entry in &defaults.budget.entries {
        let percentage = defaults
            .summary
            .as_ref()
            .and_then(|summary| summary.per_category.iter().find(|p| p.key == entry.key))
            .map(|p| format_percentage(p.percentage))
            .unwrap_or_default();
        let max = entry
            .max
            .map(|max| format!(r#" max="{max}""#))
            .unwrap_or_default();
        let key = escape(&entry.key);

        let _ = write!(
            rows,
            r#"
        <label class="row" for="{key}">
          <span class="row-label">{label}</span>
          <input type="number" class="hour-input" id="{key}" name="{key}" min="{min}"{max} step="1" placeholder="{min}" value="{value}" data-default="{value}" />
          <span class="percentage" id="{key}-percentage">{percentage}</span>
        </label>"#,
            label = escape(&entry.label),
            min = entry.min,
            value = entry.value,
        );
    }
    rows
}

fn render_slider(layout: &BudgetLayout, defaults: &RecalculateResponse) -> String {
    let Some(slider) = &layout.slider else {
        return String::new();
    };
    let value = defaults.slider_value.unwrap_or(slider.min);
    let label = layout
        .categories
        .iter()
        .find(|category| category.key == slider.key)
        .map(|category| escape(&category.label))
        .unwrap_or_default();

    format!(
        r#"<div class="slider-card">
        <label for="slider">{label}: <strong id="slider-credits">{value}</strong></label>
        <input type="range" id="slider" data-target="{target}" min="{min}" max="{max}" step="1" value="{value}" />
      </div>"#,
        target = escape(&slider.key),
        min = slider.min,
        max = slider.max,
    )
}

fn initial_state(defaults: &RecalculateResponse) -> String {
    serde_json::to_string(defaults)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weekly Time Budget</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .layout {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 24px;
    }

    .input-wrapper {
      display: grid;
      gap: 10px;
    }

    .row {
      display: grid;
      grid-template-columns: 1fr 90px 70px;
      align-items: center;
      gap: 12px;
      background: white;
      border-radius: 14px;
      padding: 10px 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .row input {
      width: 100%;
      padding: 6px 8px;
      font-size: 1rem;
      border-radius: 8px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .percentage {
      text-align: right;
      color: var(--accent-2);
      font-weight: 600;
    }

    .slider-card {
      display: grid;
      gap: 8px;
      background: white;
      border-radius: 14px;
      padding: 14px;
    }

    .remaining {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .remaining.over {
      color: #c63b2b;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    #chart {
      width: 100%;
      max-width: 360px;
      display: block;
      margin: 0 auto;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Weekly Time Budget</h1>
      <p class="subtitle">Split the {{TOTAL}} hours of your week across what you actually do.</p>
    </header>

    <section class="layout">
      <form class="input-wrapper" id="budget-form" onsubmit="return false">
        {{SLIDER}}
        {{ROWS}}
        <button type="button" id="reset-button">Reset to defaults</button>
      </form>

      <div>
        <p class="remaining" id="remaining">Hours left: <span id="hours-left">{{REMAINING}}</span></p>
        <svg id="chart" viewBox="-110 -110 220 220" role="img" aria-label="Time allocation"></svg>
        <div class="status" id="status"></div>
      </div>
    </section>
  </main>

  <script>
    const form = document.getElementById('budget-form');
    const inputs = Array.from(document.querySelectorAll('.hour-input'));
    const slider = document.getElementById('slider');
    const sliderCredits = document.getElementById('slider-credits');
    const hoursLeft = document.getElementById('hours-left');
    const remainingEl = document.getElementById('remaining');
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');
    const initialState = {{INITIAL_STATE}};

    let chartReady = false;
    let sequence = 0;

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      })[ch]);

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const readValues = () => {
      const values = {};
      inputs.forEach((input) => {
        values[input.name] = input.value;
      });
      return values;
    };

    const wedge = (start, end) => {
      const r = 100;
      if (end - start >= 0.9999) {
        return `M 0 ${-r} A ${r} ${r} 0 1 1 0 ${r} A ${r} ${r} 0 1 1 0 ${-r} Z`;
      }
      const point = (fraction) => {
        const angle = fraction * Math.PI * 2 - Math.PI / 2;
        return `${(Math.cos(angle) * r).toFixed(2)} ${(Math.sin(angle) * r).toFixed(2)}`;
      };
      const large = end - start > 0.5 ? 1 : 0;
      return `M 0 0 L ${point(start)} A ${r} ${r} 0 ${large} 1 ${point(end)} Z`;
    };

    const drawSlices = (slices) => {
      const total = slices.reduce((sum, slice) => sum + slice.value, 0);
      if (total <= 0) {
        chartEl.innerHTML = '<text x="0" y="0" text-anchor="middle">No hours allocated</text>';
        return;
      }
      let cursor = 0;
      let markup = '';
      slices.forEach((slice) => {
        if (slice.value <= 0) {
          return;
        }
        const start = cursor / total;
        cursor += slice.value;
        const end = cursor / total;
        const mid = ((start + end) / 2) * Math.PI * 2 - Math.PI / 2;
        markup += `<path d="${wedge(start, end)}" fill="${escapeHtml(slice.color)}"><title>${escapeHtml(slice.label)}: ${slice.value.toFixed(2)}%</title></path>`;
        if (end - start > 0.04) {
          markup += `<text x="${(Math.cos(mid) * 62).toFixed(2)}" y="${(Math.sin(mid) * 62).toFixed(2)}" fill="${escapeHtml(slice.label_color)}" font-size="9" text-anchor="middle">${slice.value.toFixed(1)}%</text>`;
        }
      });
      chartEl.innerHTML = markup;
    };

    const createChart = (slices) => {
      drawSlices(slices);
      chartReady = true;
    };

    const updateChart = (slices) => {
      drawSlices(slices);
    };

    const apply = (state) => {
      state.budget.entries.forEach((entry) => {
        const input = document.getElementById(entry.key);
        if (!input) {
          return;
        }
        const focusedAndEmpty = document.activeElement === input && input.value === '';
        if (!focusedAndEmpty && input.value !== String(entry.value)) {
          input.value = entry.value;
        }
      });

      if (slider && state.slider_value !== null) {
        slider.value = state.slider_value;
        sliderCredits.textContent = state.slider_value;
      }

      if (!state.summary) {
        return;
      }

      hoursLeft.textContent = state.accounting.remaining_hours;
      remainingEl.classList.toggle('over', state.accounting.over_budget);
      state.summary.per_category.forEach((result) => {
        const display = document.getElementById(`${result.key}-percentage`);
        if (display) {
          display.textContent = `${result.percentage.toFixed(2)}%`;
        }
      });

      if (chartReady) {
        updateChart(state.summary.chart_slices);
      } else {
        createChart(state.summary.chart_slices);
      }
    };

    const send = async (url, body) => {
      const current = ++sequence;
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      const state = await res.json();
      if (current === sequence) {
        setStatus('', '');
        apply(state);
      }
    };

    const recalculate = (source) =>
      send('/api/recalculate', { values: readValues(), source })
        .catch((err) => setStatus(err.message, 'error'));

    inputs.forEach((input) => {
      input.addEventListener('focus', () => {
        if (input.value === '0') {
          input.value = '';
        }
      });
      input.addEventListener('blur', () => recalculate('field'));
      input.addEventListener('input', () => {
        if (slider && input.id === slider.dataset.target) {
          slider.value = input.value;
          sliderCredits.textContent = input.value;
        }
        recalculate('field');
      });
    });

    if (slider) {
      slider.addEventListener('input', () => {
        const target = document.getElementById(slider.dataset.target);
        if (target) {
          target.value = slider.value;
        }
        sliderCredits.textContent = slider.value;
        recalculate('slider');
      });
    }

    document.getElementById('reset-button').addEventListener('click', () => {
      send('/api/reset').catch((err) => setStatus(err.message, 'error'));
    });

    form.addEventListener('submit', (event) => event.preventDefault());
    apply(initialState);
  </script>
</body>
</html>
"#;
