use crate::models::RiderTotals;
use crate::range::DateRange;

pub fn render_index(range: DateRange, totals: &RiderTotals) -> String {
    INDEX_HTML
        .replace("{{MIN_DATE}}", &range.start.to_string())
        .replace("{{MAX_DATE}}", &range.end.to_string())
        .replace("{{REGISTERED}}", &totals.registered.to_string())
        .replace("{{CASUAL}}", &totals.casual.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Bike Sharing Dashboard</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --sidebar: #e8ecf5;
      --ink: #262730;
      --muted: #6b6f7b;
      --card: #ffffff;
      --border: rgba(38, 39, 48, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Source Sans Pro", "Segoe UI", sans-serif;
      display: grid;
      grid-template-columns: 260px 1fr;
    }

    aside {
      background: var(--sidebar);
      padding: 32px 22px;
      display: grid;
      align-content: start;
      gap: 22px;
    }

    aside svg.logo {
      width: 100%;
      height: auto;
    }

    aside label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    aside input {
      font: inherit;
      padding: 8px 10px;
      border: 1px solid var(--border);
      border-radius: 8px;
      background: white;
    }

    main {
      padding: 36px 48px 48px;
      display: grid;
      gap: 28px;
      max-width: 1100px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.35rem;
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 20px;
    }

    .metric .label {
      font-size: 0.9rem;
      color: var(--muted);
    }

    .metric .value {
      font-size: 2.2rem;
      font-weight: 600;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 14px;
      padding: 16px;
    }

    svg.chart {
      width: 100%;
      display: block;
    }

    svg.chart text {
      font-family: inherit;
      fill: #4a4d57;
      font-size: 11px;
    }

    svg.chart .title {
      font-size: 14px;
      font-weight: 700;
      fill: var(--ink);
    }

    .grid-line {
      stroke: rgba(38, 39, 48, 0.1);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    footer {
      font-size: 0.85rem;
      color: var(--muted);
    }

    @media (max-width: 800px) {
      body {
        grid-template-columns: 1fr;
      }
      .columns {
        grid-template-columns: 1fr;
      }
      main {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <aside>
    <svg class="logo" viewBox="0 0 200 120" role="img" aria-label="Bike logo">
      <circle cx="50" cy="80" r="30" fill="none" stroke="#262730" stroke-width="6" />
      <circle cx="150" cy="80" r="30" fill="none" stroke="#262730" stroke-width="6" />
      <path d="M50 80 L85 35 L130 35 L150 80 M85 35 L100 80 L130 35 M75 25 L98 25 M120 20 L132 35"
        fill="none" stroke="#e4572e" stroke-width="6" stroke-linecap="round" stroke-linejoin="round" />
    </svg>
    <label>Rentang Waktu (mulai)
      <input type="date" id="start" min="{{MIN_DATE}}" max="{{MAX_DATE}}" value="{{MIN_DATE}}" />
    </label>
    <label>Rentang Waktu (akhir)
      <input type="date" id="end" min="{{MIN_DATE}}" max="{{MAX_DATE}}" value="{{MAX_DATE}}" />
    </label>
    <div class="status" id="status"></div>
  </aside>

  <main>
    <h1>&#10024; Bike Sharing Dashboard &#10024;</h1>

    <section>
      <h2>Jumlah Pengguna</h2>
      <div class="columns">
        <div class="metric">
          <div class="label">Registered</div>
          <div class="value" id="registered">{{REGISTERED}}</div>
        </div>
        <div class="metric">
          <div class="label">Casual</div>
          <div class="value" id="casual">{{CASUAL}}</div>
        </div>
      </div>
    </section>

    <section>
      <h2 id="weekday-title">Rata-Rata Sewa Sepeda Berdasarkan Hari</h2>
      <div class="card"><svg class="chart" id="weekday-chart" viewBox="0 0 800 240"></svg></div>
    </section>

    <section>
      <h2 id="hour-title">Rata-Rata Sewa Sepeda Berdasarkan Jam</h2>
      <div class="card"><svg class="chart" id="hour-chart" viewBox="0 0 800 260"></svg></div>
    </section>

    <section class="columns">
      <div class="card"><svg class="chart" id="holiday-chart" viewBox="0 0 360 320"></svg></div>
      <div class="card"><svg class="chart" id="season-chart" viewBox="0 0 360 320"></svg></div>
    </section>

    <section>
      <h2>Pengaruh Cuaca pada Sewa Sepeda</h2>
      <div class="columns">
        <div class="card"><svg class="chart" id="temperature-chart" viewBox="0 0 420 260"></svg></div>
        <div class="card"><svg class="chart" id="humidity-chart" viewBox="0 0 420 260"></svg></div>
        <div class="card"><svg class="chart" id="wind-chart" viewBox="0 0 420 260"></svg></div>
        <div class="card"><svg class="chart" id="weather-chart" viewBox="0 0 420 260"></svg></div>
      </div>
    </section>

    <section>
      <h2 id="working-title">Sewa Sepeda: Hari Kerja vs Akhir Pekan</h2>
      <div class="card"><svg class="chart" id="working-chart" viewBox="0 0 800 220"></svg></div>
    </section>

    <footer>Copyright (c) yocimm 2023</footer>
  </main>

  <script>
    const startEl = document.getElementById('start');
    const endEl = document.getElementById('end');
    const statusEl = document.getElementById('status');
    const registeredEl = document.getElementById('registered');
    const casualEl = document.getElementById('casual');

    const PALETTE = {
      weekday: ['skyblue', 'darkblue'],
      hour: ['lightgreen', 'darkgreen'],
      working: ['#f4a261', '#e76f51'],
      holiday: ['yellow', 'blue'],
      season: ['blue', 'coral', 'green', 'yellow'],
      count: ['#4c72b0', '#dd8452', '#55a868', '#c44e52']
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeText = (value) => String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;');

    const formatNumber = (value) => Math.round(value).toLocaleString('en-US');

    const niceMax = (value) => {
      if (value <= 0) {
        return 1;
      }
      const magnitude = Math.pow(10, Math.floor(Math.log10(value)));
      return Math.ceil(value / magnitude) * magnitude;
    };

    const drawBars = (svg, bars, options) => {
      const width = Number(svg.viewBox.baseVal.width);
      const height = Number(svg.viewBox.baseVal.height);
      const left = 64;
      const right = 16;
      const top = options.title ? 30 : 14;
      const bottom = options.xLabel ? 56 : 40;

      if (!bars.length) {
        svg.innerHTML = `<text x="${width / 2}" y="${height / 2}" text-anchor="middle">No data in range</text>`;
        return;
      }

      const max = niceMax(Math.max(...bars.map((bar) => bar.value)));
      const plotWidth = width - left - right;
      const plotHeight = height - top - bottom;
      const slot = plotWidth / bars.length;
      const barWidth = slot * 0.8;
      const y = (value) => top + plotHeight - (value / max) * plotHeight;

      let out = '';
      if (options.title) {
        out += `<text class="title" x="${width / 2}" y="18" text-anchor="middle">${escapeText(options.title)}</text>`;
      }
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        out += `<line class="grid-line" x1="${left}" x2="${width - right}" y1="${y(value)}" y2="${y(value)}" />`;
        out += `<text x="${left - 8}" y="${y(value) + 4}" text-anchor="end">${formatNumber(value)}</text>`;
      }
      bars.forEach((bar, index) => {
        const x = left + index * slot + (slot - barWidth) / 2;
        const color = bar.color || options.colors[index === options.highlight ? 1 : 0];
        out += `<rect x="${x}" y="${y(bar.value)}" width="${barWidth}" height="${top + plotHeight - y(bar.value)}" fill="${color}"><title>${escapeText(bar.label)}: ${formatNumber(bar.value)}</title></rect>`;
        out += `<text x="${x + barWidth / 2}" y="${top + plotHeight + 16}" text-anchor="middle">${escapeText(bar.label)}</text>`;
      });
      if (options.xLabel) {
        out += `<text x="${left + plotWidth / 2}" y="${height - 10}" text-anchor="middle">${escapeText(options.xLabel)}</text>`;
      }
      out += `<text transform="translate(14 ${top + plotHeight / 2}) rotate(-90)" text-anchor="middle">${escapeText(options.yLabel)}</text>`;
      svg.innerHTML = out;
    };

    const drawSeries = (svg, series, colors) => {
      drawBars(svg, series.points, {
        xLabel: series.x_label,
        yLabel: series.y_label,
        highlight: series.highlight,
        colors
      });
    };

    const polar = (cx, cy, r, degrees) => {
      const radians = (degrees * Math.PI) / 180;
      return [cx + r * Math.cos(radians), cy - r * Math.sin(radians)];
    };

    const drawPie = (svg, series, colors) => {
      const cx = 180;
      const cy = 175;
      const r = 110;
      const total = series.slices.reduce((sum, slice) => sum + slice.value, 0);
      let out = `<text class="title" x="${cx}" y="22" text-anchor="middle">${escapeText(series.title)}</text>`;

      if (!total) {
        svg.innerHTML = out + `<text x="${cx}" y="${cy}" text-anchor="middle">No data in range</text>`;
        return;
      }

      let angle = 140;
      series.slices.forEach((slice, index) => {
        const sweep = (slice.value / total) * 360;
        const mid = angle + sweep / 2;
        const [dx, dy] = slice.offset ? polar(0, 0, r * 0.1, mid) : [0, 0];
        const color = colors[index % colors.length];
        if (sweep >= 359.999) {
          out += `<circle cx="${cx + dx}" cy="${cy + dy}" r="${r}" fill="${color}" />`;
        } else {
          const [x1, y1] = polar(cx + dx, cy + dy, r, angle);
          const [x2, y2] = polar(cx + dx, cy + dy, r, angle + sweep);
          const large = sweep > 180 ? 1 : 0;
          out += `<path d="M ${cx + dx} ${cy + dy} L ${x1} ${y1} A ${r} ${r} 0 ${large} 0 ${x2} ${y2} Z" fill="${color}" stroke="white" stroke-width="1" />`;
        }
        const [px, py] = polar(cx + dx, cy + dy, r * 0.6, mid);
        out += `<text x="${px}" y="${py + 4}" text-anchor="middle">${slice.percent.toFixed(1)}%</text>`;
        const [lx, ly] = polar(cx + dx, cy + dy, r * 1.18, mid);
        out += `<text x="${lx}" y="${ly + 4}" text-anchor="middle">${escapeText(slice.label)}</text>`;
        angle += sweep;
      });
      svg.innerHTML = out;
    };

    const drawCountPlot = (svg, plot) => {
      drawBars(svg, plot.bars.map((bar, index) => ({
        label: bar.label,
        value: bar.count,
        color: PALETTE.count[index % PALETTE.count.length]
      })), {
        title: plot.title,
        xLabel: plot.x_label,
        yLabel: plot.y_label,
        colors: PALETTE.count
      });
    };

    const render = (data) => {
      registeredEl.textContent = data.totals.registered;
      casualEl.textContent = data.totals.casual;
      drawSeries(document.getElementById('weekday-chart'), data.by_weekday, PALETTE.weekday);
      drawSeries(document.getElementById('hour-chart'), data.by_hour, PALETTE.hour);
      drawPie(document.getElementById('holiday-chart'), data.by_holiday, PALETTE.holiday);
      drawPie(document.getElementById('season-chart'), data.by_season, PALETTE.season);
      drawCountPlot(document.getElementById('temperature-chart'), data.conditions.temperature);
      drawCountPlot(document.getElementById('humidity-chart'), data.conditions.humidity);
      drawCountPlot(document.getElementById('wind-chart'), data.conditions.wind);
      drawCountPlot(document.getElementById('weather-chart'), data.conditions.weather);
      drawSeries(document.getElementById('working-chart'), data.by_working_day, PALETTE.working);
      setStatus(`${data.range.days_selected} hari (${data.range.start} → ${data.range.end})`, 'ok');
    };

    const refresh = async () => {
      const params = new URLSearchParams({ start: startEl.value, end: endEl.value });
      setStatus('Loading...', 'info');
      const res = await fetch(`/api/dashboard?${params}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load dashboard');
      }
      render(await res.json());
    };

    [startEl, endEl].forEach((input) => {
      input.addEventListener('change', () => {
        refresh().catch((err) => setStatus(err.message, 'error'));
      });
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn index_fills_bounds_and_metrics() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2012, 12, 31).unwrap(),
        };
        let totals = RiderTotals {
            registered: 2672662,
            casual: 620017,
        };
        let html = render_index(range, &totals);
        assert!(html.contains(r#"min="2011-01-01""#));
        assert!(html.contains(r#"value="2012-12-31""#));
        assert!(html.contains(">2672662<"));
        assert!(html.contains(">620017<"));
        assert!(!html.contains("{{"));
    }
}
